//! 서비스 계층.
//!
//! 라우트 핸들러에서 플로우 오케스트레이션 로직을 분리합니다.

mod auth;

pub use auth::AuthService;
