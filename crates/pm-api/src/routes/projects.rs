//! 프로젝트 API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /projects` - 목록 조회 (인증된 사용자 누구나, `?q=` 이름 필터)
//! - `POST /projects` - 생성 (manager, admin)
//! - `PUT /projects/{id}` - 전체 갱신 (manager, admin)
//! - `DELETE /projects/{id}` - 삭제 (admin)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use pm_core::{CoreError, NewProject, Project, ProjectStore, Role, UpdateProject};

use crate::auth::{require_role, CurrentUser};
use crate::error::ApiResult;
use crate::routes::auth::MessageResponse;
use crate::state::AppState;

/// 프로젝트 목록 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    /// 이름 부분 일치 필터 (대소문자 무시)
    pub q: Option<String>,
}

/// GET /projects
async fn list_projects(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.projects.list(query.q.as_deref()).await?;
    Ok(Json(projects))
}

/// POST /projects
async fn create_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    require_role(&user, &[Role::Manager, Role::Admin])?;

    let project = state.projects.insert(req).await?;
    info!(project_id = project.id, name = %project.name, "프로젝트 생성");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /projects/{id}
async fn update_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProject>,
) -> ApiResult<Json<Project>> {
    require_role(&user, &[Role::Manager, Role::Admin])?;

    let project = state
        .projects
        .update(id, req)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("프로젝트를 찾을 수 없습니다: {id}")))?;
    Ok(Json(project))
}

/// DELETE /projects/{id}
async fn delete_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    require_role(&user, &[Role::Admin])?;

    if !state.projects.delete(id).await? {
        return Err(CoreError::NotFound(format!("프로젝트를 찾을 수 없습니다: {id}")).into());
    }

    info!(project_id = id, "프로젝트 삭제");
    Ok(Json(MessageResponse {
        message: format!("프로젝트가 삭제되었습니다: {id}"),
    }))
}

/// 프로젝트 라우터.
pub fn projects_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/{id}", axum::routing::put(update_project).delete(delete_project))
}
