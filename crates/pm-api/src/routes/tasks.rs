//! 작업(Task) API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /tasks` - 목록 조회 (인증된 사용자 누구나, `?status=`, `?project_id=` 필터)
//! - `POST /tasks` - 생성 (user, manager, admin / 소유자 = 호출자)
//! - `PUT /tasks/{id}` - 부분 갱신 (user, manager, admin)
//! - `DELETE /tasks/{id}` - 삭제 (manager, admin)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use pm_core::{CoreError, NewTask, Role, Task, TaskStatus, TaskStore, UpdateTask};

use crate::auth::{require_role, CurrentUser};
use crate::error::ApiResult;
use crate::routes::auth::MessageResponse;
use crate::state::AppState;

/// 작업 목록 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub project_id: Option<i64>,
}

/// GET /tasks
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list(query.status, query.project_id).await?;
    Ok(Json(tasks))
}

/// POST /tasks
async fn create_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    require_role(&user, &[Role::User, Role::Manager, Role::Admin])?;

    let task = state.tasks.insert(user.id, req).await?;
    info!(task_id = task.id, owner_id = user.id, "작업 생성");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id}
async fn update_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    require_role(&user, &[Role::User, Role::Manager, Role::Admin])?;

    let task = state
        .tasks
        .update(id, req)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("작업을 찾을 수 없습니다: {id}")))?;
    Ok(Json(task))
}

/// DELETE /tasks/{id}
async fn delete_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    require_role(&user, &[Role::Manager, Role::Admin])?;

    if !state.tasks.delete(id).await? {
        return Err(CoreError::NotFound(format!("작업을 찾을 수 없습니다: {id}")).into());
    }

    info!(task_id = id, "작업 삭제");
    Ok(Json(MessageResponse {
        message: format!("작업이 삭제되었습니다: {id}"),
    }))
}

/// 작업 라우터.
pub fn tasks_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", axum::routing::put(update_task).delete(delete_task))
}
