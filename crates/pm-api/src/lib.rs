//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 (access / refresh / reset 토큰)
//! - 역할 기반 접근 제어 (flat allow-set)
//! - 비밀번호 해싱 및 강도 검증
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 발급/검증, 비밀번호 정책, 인증 게이트
//! - [`services`]: 인증 플로우 오케스트레이션
//! - [`repository`]: 저장소 구현 (Postgres / 인메모리)
//! - [`error`]: 통합 API 에러 응답

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, CurrentUser, PasswordError,
    TokenError, TokenPair, TokenPurpose,
};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use services::AuthService;
pub use state::AppState;
