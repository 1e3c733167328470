//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체 (subject + 용도 태그)
//! - [`TokenPurpose`]: access / refresh / reset 용도 구분자
//! - [`CurrentUser`]: Axum 핸들러용 인증 추출기
//! - [`require_role`]: 명시적 허용 역할 집합 검사
//! - 비밀번호 해싱 및 강도 검증 함수
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 보호된 라우트에서 CurrentUser 추출기 사용
//! async fn protected_handler(
//!     CurrentUser(user): CurrentUser,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{
    create_token, decode_token, issue_reset_token, issue_token_pair, Claims, TokenError, TokenPair,
    TokenPurpose,
};
pub use middleware::{require_role, CurrentUser};
pub use password::{hash_password, validate_password_strength, verify_password, PasswordError};
