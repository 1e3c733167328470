//! 사용자 관리 API 라우트 (관리자 전용).
//!
//! # 엔드포인트
//!
//! - `GET /users` - 전체 사용자 목록 (admin)
//! - `PATCH /users/{id}/role` - 역할 변경 (admin)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use pm_core::{CoreError, PublicUser, Role, UserStore};

use crate::auth::{require_role, CurrentUser};
use crate::error::ApiResult;
use crate::state::AppState;

/// 역할 변경 요청.
#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

/// GET /users
async fn list_users(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<PublicUser>>> {
    require_role(&user, &[Role::Admin])?;

    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(|u| u.to_public()).collect()))
}

/// PATCH /users/{id}/role
async fn update_role(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpdateRequest>,
) -> ApiResult<Json<PublicUser>> {
    require_role(&user, &[Role::Admin])?;

    let updated = state
        .users
        .update_role(id, req.role)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("사용자를 찾을 수 없습니다: {id}")))?;

    info!(user_id = id, role = %req.role, "사용자 역할 변경");
    Ok(Json(updated.to_public()))
}

/// 사용자 관리 라우터.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}/role", patch(update_role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use pm_core::AuthConfig;
    use tower::ServiceExt;

    use crate::auth::issue_token_pair;

    /// 주어진 역할의 사용자를 등록하고 (앱, 상태, 액세스 토큰, ID)를 반환.
    async fn app_with_user(role: Role) -> (Router, Arc<AppState>, String, i64) {
        let state = Arc::new(AppState::in_memory(AuthConfig::default()));
        let created = state.auth.register("user@test.com", "Abcd1234").await.unwrap();
        let user = state
            .users
            .update_role(created.id, role)
            .await
            .unwrap()
            .unwrap();
        let pair = issue_token_pair(&user, state.auth.config()).unwrap();
        let app = users_router().with_state(state.clone());
        (app, state, pair.access_token, user.id)
    }

    fn patch_role(id: i64, token: &str, role: &str) -> Request<Body> {
        Request::builder()
            .method("PATCH")
            .uri(format!("/{id}/role"))
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::json!({"role": role}).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_requires_admin() {
        let (app, _state, token, _) = app_with_user(Role::Manager).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_lists_all_users() {
        let (app, state, token, _) = app_with_user(Role::Admin).await;
        state.auth.register("other@test.com", "Abcd1234").await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let users: Vec<PublicUser> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_role_update_requires_admin() {
        let (app, state, token, _) = app_with_user(Role::Manager).await;
        let target = state.auth.register("other@test.com", "Abcd1234").await.unwrap();

        let response = app
            .oneshot(patch_role(target.id, &token, "manager"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_updates_role() {
        let (app, state, token, _) = app_with_user(Role::Admin).await;
        let target = state.auth.register("other@test.com", "Abcd1234").await.unwrap();
        assert_eq!(target.role, Role::User);

        let response = app
            .oneshot(patch_role(target.id, &token, "manager"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let updated: PublicUser = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_role_update_missing_user_returns_404() {
        let (app, _state, token, _) = app_with_user(Role::Admin).await;

        let response = app.oneshot(patch_role(999, &token, "admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
