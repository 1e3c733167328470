//! PostgreSQL 저장소 구현.
//!
//! sqlx 기반 저장소 trait 구현. 스키마(users/projects/tasks 테이블)는
//! 배포 시 준비되어 있다고 가정합니다.

use async_trait::async_trait;
use sqlx::PgPool;

use pm_core::{
    CoreError, CoreResult, NewProject, NewTask, NewUser, Project, ProjectStore, Role, Task,
    TaskStatus, TaskStore, UpdateProject, UpdateTask, User, UserStore,
};

/// PostgreSQL 사용자 저장소.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// 새 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, is_active, reset_token
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, is_active, reset_token
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert(&self, new_user: NewUser) -> CoreResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, role, is_active)
             VALUES ($1, $2, $3, TRUE)
             RETURNING id, email, password_hash, role, is_active, reset_token",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // 동시 등록 경쟁에서 고유 제약이 마지막 방어선
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                CoreError::Conflict(new_user.email.clone())
            } else {
                db_error(e)
            }
        })
    }

    async fn list(&self) -> CoreResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, is_active, reset_token
             FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update_role(&self, id: i64, role: Role) -> CoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2 WHERE id = $1
             RETURNING id, email, password_hash, role, is_active, reset_token",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update_password_hash(&self, id: i64, hash: &str) -> CoreResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(hash)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn update_reset_token(&self, id: i64, token: Option<&str>) -> CoreResult<()> {
        sqlx::query("UPDATE users SET reset_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

/// PostgreSQL 프로젝트 저장소.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    /// 새 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn list(&self, q: Option<&str>) -> CoreResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT id, name, description, created_at FROM projects
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
             ORDER BY created_at DESC, id DESC",
        )
        .bind(q)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert(&self, new_project: NewProject) -> CoreResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, description, created_at)
             VALUES ($1, $2, NOW())
             RETURNING id, name, description, created_at",
        )
        .bind(&new_project.name)
        .bind(&new_project.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update(&self, id: i64, update: UpdateProject) -> CoreResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = $2, description = $3 WHERE id = $1
             RETURNING id, name, description, created_at",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn delete(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL 태스크 저장소.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    /// 새 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(
        &self,
        status: Option<TaskStatus>,
        project_id: Option<i64>,
    ) -> CoreResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, status, project_id, owner_id, created_at FROM tasks
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR project_id = $2)
             ORDER BY created_at DESC, id DESC",
        )
        .bind(status.map(|s| s.to_string()))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn insert(&self, owner_id: i64, new_task: NewTask) -> CoreResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, status, project_id, owner_id, created_at)
             VALUES ($1, $2, $3, $4, NOW())
             RETURNING id, title, status, project_id, owner_id, created_at",
        )
        .bind(&new_task.title)
        .bind(new_task.status)
        .bind(new_task.project_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn update(&self, id: i64, update: UpdateTask) -> CoreResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = COALESCE($2, title), status = COALESCE($3, status)
             WHERE id = $1
             RETURNING id, title, status, project_id, owner_id, created_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(update.status.map(|s| s.to_string()))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn delete(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

fn db_error(err: sqlx::Error) -> CoreError {
    CoreError::Database(err.to_string())
}
