//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/auth` - 등록/로그인/리프레시/비밀번호 재설정·변경
//! - `/users` - 사용자 관리 (admin 전용)
//! - `/projects` - 프로젝트 관리
//! - `/tasks` - 태스크 관리

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub use auth::{
    auth_router, ChangePasswordRequest, LoginRequest, MessageResponse, RefreshRequest,
    RegisterRequest, ResetConfirmRequest, ResetRequest,
};
pub use health::{health_router, ComponentStatus, HealthResponse};
pub use projects::{projects_router, ProjectListQuery};
pub use tasks::{tasks_router, TaskListQuery};
pub use users::{users_router, RoleUpdateRequest};

/// 전체 API 라우터 구성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .nest("/auth", auth_router())
        .nest("/users", users_router())
        .nest("/projects", projects_router())
        .nest("/tasks", tasks_router())
}
