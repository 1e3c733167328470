//! 인증 API 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /auth/register` - 사용자 등록
//! - `POST /auth/login` - 로그인 (access + refresh 쌍 발급)
//! - `POST /auth/refresh` - 토큰 리프레시 (rotation)
//! - `GET /auth/me` - 내 프로필
//! - `POST /auth/password-reset/request` - 재설정 요청 (항상 동일 응답)
//! - `POST /auth/password-reset/confirm` - 재설정 확인
//! - `POST /auth/change-password` - 비밀번호 변경 (인증 필요)

use std::sync::Arc;

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pm_core::PublicUser;

use crate::auth::{CurrentUser, TokenPair};
use crate::error::ApiResult;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 등록 요청.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// 로그인 요청.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 토큰 리프레시 요청.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// 비밀번호 재설정 요청.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// 비밀번호 재설정 확인 요청.
#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

/// 비밀번호 변경 요청.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// 일반 메시지 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<PublicUser>> {
    let user = state.auth.register(&req.email, &req.password).await?;
    Ok(Json(user))
}

/// POST /auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    debug!(email = %req.email, "로그인 시도");
    let pair = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(pair))
}

/// POST /auth/refresh
async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    let pair = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(pair))
}

/// GET /auth/me
async fn me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.to_public())
}

/// POST /auth/password-reset/request
///
/// 이메일 존재 여부와 무관하게 동일한 메시지를 반환합니다.
async fn password_reset_request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.request_password_reset(&req.email).await?;
    Ok(Json(MessageResponse::new(
        "이메일이 존재한다면 재설정 토큰이 발급되었습니다",
    )))
}

/// POST /auth/password-reset/confirm
async fn password_reset_confirm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetConfirmRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .auth
        .confirm_password_reset(&req.token, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("비밀번호가 변경되었습니다")))
}

/// POST /auth/change-password
async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .auth
        .change_password(&user, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("비밀번호가 변경되었습니다")))
}

/// 인증 라우터.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .route("/password-reset/request", post(password_reset_request))
        .route("/password-reset/confirm", post(password_reset_confirm))
        .route("/change-password", post(change_password))
}
