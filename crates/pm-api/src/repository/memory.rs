//! 인메모리 저장소 구현.
//!
//! `DATABASE_URL`이 설정되지 않은 개발 환경과 테스트에서 사용합니다.
//! ID는 저장소 단위로 단조 증가하는 i64 카운터로 발급합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pm_core::{
    CoreError, CoreResult, NewProject, NewTask, NewUser, Project, ProjectStore, Role, Task,
    TaskStatus, TaskStore, UpdateProject, UpdateTask, User, UserStore,
};

/// 인메모리 사용자 저장소.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 활성 플래그 변경 (관리/테스트용).
    pub async fn set_active(&self, id: i64, is_active: bool) -> CoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|u| {
            u.is_active = is_active;
            u.clone()
        }))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let users = self.users.read().await;
        // 정확 일치 (대소문자 구분)
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> CoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(CoreError::Conflict(new_user.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: true,
            reset_token: None,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> CoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn update_role(&self, id: i64, role: Role) -> CoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn update_password_hash(&self, id: i64, hash: &str) -> CoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.password_hash = hash.to_string();
        }
        Ok(())
    }

    async fn update_reset_token(&self, id: i64, token: Option<&str>) -> CoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.reset_token = token.map(str::to_string);
        }
        Ok(())
    }
}

/// 인메모리 프로젝트 저장소.
#[derive(Default)]
pub struct MemoryProjectStore {
    projects: RwLock<HashMap<i64, Project>>,
    next_id: AtomicI64,
}

impl MemoryProjectStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn list(&self, q: Option<&str>) -> CoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let needle = q.map(str::to_lowercase);
        let mut matched: Vec<Project> = projects
            .values()
            .filter(|p| match &needle {
                Some(n) => p.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        // 최신순, 동일 시각이면 ID 내림차순
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    async fn insert(&self, new_project: NewProject) -> CoreResult<Project> {
        let mut projects = self.projects.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let project = Project {
            id,
            name: new_project.name,
            description: new_project.description,
            created_at: Utc::now(),
        };
        projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update(&self, id: i64, update: UpdateProject) -> CoreResult<Option<Project>> {
        let mut projects = self.projects.write().await;
        Ok(projects.get_mut(&id).map(|p| {
            p.name = update.name;
            p.description = update.description;
            p.clone()
        }))
    }

    async fn delete(&self, id: i64) -> CoreResult<bool> {
        let mut projects = self.projects.write().await;
        Ok(projects.remove(&id).is_some())
    }
}

/// 인메모리 태스크 저장소.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<i64, Task>>,
    next_id: AtomicI64,
}

impl MemoryTaskStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(
        &self,
        status: Option<TaskStatus>,
        project_id: Option<i64>,
    ) -> CoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut matched: Vec<Task> = tasks
            .values()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .filter(|t| project_id.map_or(true, |p| t.project_id == p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    async fn insert(&self, owner_id: i64, new_task: NewTask) -> CoreResult<Task> {
        let mut tasks = self.tasks.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = Task {
            id,
            title: new_task.title,
            status: new_task.status,
            project_id: new_task.project_id,
            owner_id,
            created_at: Utc::now(),
        };
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i64, update: UpdateTask) -> CoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|t| {
            if let Some(title) = update.title {
                t.title = title;
            }
            if let Some(status) = update.status {
                t.status = status;
            }
            t.clone()
        }))
    }

    async fn delete(&self, id: i64) -> CoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_store_email_is_exact_match_unique() {
        let store = MemoryUserStore::new();
        store
            .insert(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "h1".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        // 중복 이메일 → Conflict
        let err = store
            .insert(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "h2".to_string(),
                role: Role::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        // 대소문자가 다르면 다른 키 (정확 일치)
        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_user_store_updates() {
        let store = MemoryUserStore::new();
        let user = store
            .insert(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "h1".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        let updated = store.update_role(user.id, Role::Manager).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Manager);
        assert!(store.update_role(999, Role::Admin).await.unwrap().is_none());

        store.update_reset_token(user.id, Some("tok")).await.unwrap();
        let found = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.reset_token.as_deref(), Some("tok"));

        store.update_reset_token(user.id, None).await.unwrap();
        let found = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(found.reset_token.is_none());
    }

    #[tokio::test]
    async fn test_project_store_filter_case_insensitive() {
        let store = MemoryProjectStore::new();
        for name in ["Website Revamp", "Mobile App", "website redesign"] {
            store
                .insert(NewProject {
                    name: name.to_string(),
                    description: None,
                })
                .await
                .unwrap();
        }

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let matched = store.list(Some("WEBSITE")).await.unwrap();
        assert_eq!(matched.len(), 2);

        let none = store.list(Some("backend")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_task_store_filters() {
        let store = MemoryTaskStore::new();
        store
            .insert(
                1,
                NewTask {
                    title: "Landing page".to_string(),
                    status: TaskStatus::Todo,
                    project_id: 1,
                },
            )
            .await
            .unwrap();
        store
            .insert(
                2,
                NewTask {
                    title: "Auth flow".to_string(),
                    status: TaskStatus::Doing,
                    project_id: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(store.list(None, None).await.unwrap().len(), 2);
        assert_eq!(
            store.list(Some(TaskStatus::Doing), None).await.unwrap().len(),
            1
        );
        assert_eq!(store.list(None, Some(1)).await.unwrap().len(), 1);
        assert!(store
            .list(Some(TaskStatus::Done), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_task_partial_update_and_delete() {
        let store = MemoryTaskStore::new();
        let task = store
            .insert(
                1,
                NewTask {
                    title: "Task A".to_string(),
                    status: TaskStatus::Todo,
                    project_id: 1,
                },
            )
            .await
            .unwrap();

        let updated = store
            .update(
                task.id,
                UpdateTask {
                    title: None,
                    status: Some(TaskStatus::Doing),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Task A");
        assert_eq!(updated.status, TaskStatus::Doing);

        assert!(store.delete(task.id).await.unwrap());
        assert!(!store.delete(task.id).await.unwrap());
    }
}
