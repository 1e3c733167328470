//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use pm_core::CoreError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "FORBIDDEN",
///   "message": "권한이 부족합니다",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "CONFLICT", "INVALID_TOKEN", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    pub timestamp: i64,
}

impl ApiErrorResponse {
    /// 기본 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// HTTP 응답으로 변환 가능한 API 에러.
///
/// [`CoreError`] 분류를 HTTP 상태 코드와 에러 코드로 사상합니다.
/// Database/Internal 에러는 상세 내용을 감추고 일반 메시지로 대체합니다.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

/// API 핸들러용 Result 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 이 에러에 해당하는 HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InvalidCredentials => StatusCode::BAD_REQUEST,
            CoreError::InvalidToken => StatusCode::BAD_REQUEST,
            CoreError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            CoreError::Forbidden => StatusCode::FORBIDDEN,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Database(_) | CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match &self.0 {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::InvalidCredentials => "INVALID_CREDENTIALS",
            CoreError::InvalidToken => "INVALID_TOKEN",
            CoreError::Unauthenticated(_) => "UNAUTHENTICATED",
            CoreError::Forbidden => "FORBIDDEN",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Database(_) => "DB_ERROR",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.0.is_client_facing() {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "내부 에러 발생");
            "내부 서버 에러".to_string()
        };

        let body = Json(ApiErrorResponse::new(self.code(), message));
        (status, body).into_response()
    }
}
