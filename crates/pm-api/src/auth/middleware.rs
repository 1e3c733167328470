//! Axum용 인증 게이트.
//!
//! 베어러 토큰을 인증된 사용자(Principal)로 환원하는 추출기와
//! 역할 허용 집합 검사를 제공합니다.
//!
//! 보호된 작업은 항상 인증([`CurrentUser`]) 후 인가([`require_role`])
//! 순서로 검사하며, 인증 실패는 인가 평가 전에 단락(short-circuit)됩니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use pm_core::{CoreError, Role, User, UserStore};

use super::{decode_token, TokenPurpose};
use crate::error::ApiError;
use crate::state::AppState;

/// 인증된 사용자 추출기.
///
/// Authorization 헤더의 베어러 토큰을 검증하고 subject를 사용자
/// 레코드로 환원합니다. 다음 경우 모두 401로 거부합니다:
///
/// - 헤더 누락 또는 형식 불량
/// - 서명 불량 / 만료 / access 이외의 용도
/// - subject에 해당하는 사용자가 없거나 비활성
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| unauthenticated("인증 토큰이 필요합니다"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthenticated("잘못된 Authorization 헤더 형식"))?;

        let token_data = decode_token(token, &state.auth.config().secret)
            .map_err(|_| unauthenticated("유효하지 않거나 만료된 토큰"))?;

        // 용도 태그 확인 - refresh/reset 토큰으로는 접근 불가
        if token_data.claims.purpose != TokenPurpose::Access {
            return Err(unauthenticated("액세스 토큰이 아닙니다"));
        }

        let user_id = token_data
            .claims
            .subject_id()
            .map_err(|_| unauthenticated("유효하지 않은 토큰 subject"))?;

        let user = state
            .auth
            .users()
            .find_by_id(user_id)
            .await
            .map_err(ApiError::from)?
            .filter(|u| u.is_active)
            .ok_or_else(|| unauthenticated("비활성 또는 존재하지 않는 사용자"))?;

        Ok(CurrentUser(user))
    }
}

/// 역할 게이트.
///
/// 허용 역할 집합에 대한 정확 일치 검사입니다. 역할 간 상하 관계는
/// 없으므로, admin도 `allowed`에 명시적으로 포함될 때만 통과합니다.
pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

fn unauthenticated(message: &str) -> ApiError {
    ApiError(CoreError::Unauthenticated(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use pm_core::{AuthConfig, LogNotifier, NewUser, UserStore};

    use crate::auth::{create_token, issue_token_pair, Claims};
    use crate::repository::{MemoryProjectStore, MemoryTaskStore, MemoryUserStore};
    use crate::services::AuthService;
    use crate::state::AppState;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/projects");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    async fn state_with_user(role: Role, is_active: bool) -> (Arc<AppState>, User) {
        let users = Arc::new(MemoryUserStore::new());
        let auth = AuthService::new(users.clone(), Arc::new(LogNotifier), AuthConfig::default());
        let state = Arc::new(AppState::new(
            auth,
            users.clone(),
            Arc::new(MemoryProjectStore::new()),
            Arc::new(MemoryTaskStore::new()),
        ));

        let user = users
            .insert(NewUser {
                email: "gate@x.com".to_string(),
                password_hash: "unused".to_string(),
                role,
            })
            .await
            .unwrap();

        let user = if is_active {
            user
        } else {
            users.set_active(user.id, false).await.unwrap().unwrap()
        };

        (state, user)
    }

    #[tokio::test]
    async fn test_access_token_accepted() {
        let (state, user) = state_with_user(Role::User, true).await;
        let pair = issue_token_pair(&user, state.auth.config()).unwrap();

        let mut parts = parts_with_header(Some(&format!("Bearer {}", pair.access_token)));
        let current = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(current.0.id, user.id);
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_by_gate() {
        // access 토큰이 기대되는 곳에 refresh 토큰 제시 → 401
        let (state, user) = state_with_user(Role::User, true).await;
        let pair = issue_token_pair(&user, state.auth.config()).unwrap();

        let mut parts = parts_with_header(Some(&format!("Bearer {}", pair.refresh_token)));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_header_rejected() {
        let (state, _) = state_with_user(Role::User, true).await;

        let mut parts = parts_with_header(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let mut parts = parts_with_header(Some("Token abc"));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_inactive_user_rejected() {
        let (state, user) = state_with_user(Role::User, false).await;
        let pair = issue_token_pair(&user, state.auth.config()).unwrap();

        let mut parts = parts_with_header(Some(&format!("Bearer {}", pair.access_token)));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_subject_rejected() {
        let (state, _) = state_with_user(Role::User, true).await;
        let claims = Claims::new(9999, TokenPurpose::Access, Some(Role::User), 30);
        let token = create_token(&claims, &state.auth.config().secret).unwrap();

        let mut parts = parts_with_header(Some(&format!("Bearer {}", token)));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_require_role_exact_set_membership() {
        let mut user = User {
            id: 1,
            email: "r@x.com".to_string(),
            password_hash: String::new(),
            role: Role::User,
            is_active: true,
            reset_token: None,
        };

        // user는 {manager, admin} 게이트에서 거부
        assert!(matches!(
            require_role(&user, &[Role::Manager, Role::Admin]),
            Err(CoreError::Forbidden)
        ));

        // admin은 명시적으로 열거된 집합만 통과 (상하 관계 없음)
        user.role = Role::Admin;
        assert!(require_role(&user, &[Role::Manager, Role::Admin]).is_ok());
        assert!(matches!(
            require_role(&user, &[Role::Manager]),
            Err(CoreError::Forbidden)
        ));

        user.role = Role::Manager;
        assert!(require_role(&user, &[Role::Manager]).is_ok());
    }
}
