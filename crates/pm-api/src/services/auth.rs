//! 인증 플로우 오케스트레이션.
//!
//! 등록 / 로그인 / 토큰 리프레시 / 비밀번호 재설정 / 비밀번호 변경
//! 플로우를 저장소·알림 collaborator와 토큰/비밀번호 유틸리티 위에서
//! 조합합니다. HTTP에 의존하지 않으므로 라우터 없이 테스트 가능합니다.

use std::sync::Arc;

use validator::ValidateEmail;

use pm_core::{AuthConfig, CoreError, CoreResult, NewUser, PublicUser, ResetNotifier, Role, User, UserStore};

use crate::auth::{
    decode_token, hash_password, issue_reset_token, issue_token_pair, validate_password_strength,
    verify_password, PasswordError, TokenPair, TokenPurpose,
};

/// 인증 플로우 서비스.
///
/// 프로세스 시작 시 한 번 구성되어 불변으로 공유됩니다.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn ResetNotifier>,
    config: AuthConfig,
}

impl AuthService {
    /// 새 인증 서비스 생성.
    pub fn new(
        users: Arc<dyn UserStore>,
        notifier: Arc<dyn ResetNotifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            notifier,
            config,
        }
    }

    /// 인증 설정.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// 사용자 저장소.
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// 사용자 등록.
    ///
    /// 이메일 형식과 비밀번호 강도를 검증한 뒤 `user` 역할로 저장합니다.
    /// 이메일이 이미 존재하면 `Conflict`.
    pub async fn register(&self, email: &str, password: &str) -> CoreResult<PublicUser> {
        if !email.validate_email() {
            return Err(CoreError::Validation(
                "올바른 이메일 형식이 아닙니다".to_string(),
            ));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(CoreError::Conflict(email.to_string()));
        }

        validate_password_strength(password).map_err(policy_violation)?;
        let password_hash =
            hash_password(password).map_err(|e| CoreError::Internal(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser {
                email: email.to_string(),
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = user.id, "신규 사용자 등록");
        Ok(user.to_public())
    }

    /// 로그인.
    ///
    /// 존재하지 않는 사용자와 잘못된 비밀번호를 구분하지 않고 동일하게
    /// `InvalidCredentials`로 실패합니다 (사용자 열거 방지).
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<TokenPair> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(CoreError::InvalidCredentials);
        }

        issue_token_pair(&user, &self.config).map_err(|e| CoreError::Internal(e.to_string()))
    }

    /// 토큰 리프레시.
    ///
    /// refresh 용도가 아닌 토큰은 `InvalidToken`. 성공 시 새 만료 시각을
    /// 가진 완전히 새로운 쌍을 발급합니다 (rotation).
    pub async fn refresh(&self, token: &str) -> CoreResult<TokenPair> {
        let token_data =
            decode_token(token, &self.config.secret).map_err(|_| CoreError::InvalidToken)?;

        if token_data.claims.purpose != TokenPurpose::Refresh {
            return Err(CoreError::InvalidToken);
        }

        let user_id = token_data.claims.subject_id().map_err(|_| CoreError::InvalidToken)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(CoreError::InvalidToken)?;

        issue_token_pair(&user, &self.config).map_err(|e| CoreError::Internal(e.to_string()))
    }

    /// 비밀번호 재설정 요청.
    ///
    /// 이메일 존재 여부와 무관하게 호출자는 동일한 일반 메시지를 받습니다.
    /// 사용자가 존재하면 reset 토큰을 발급해 레코드에 저장(이전 토큰
    /// 덮어쓰기)하고 out-of-band 전달기에 넘깁니다.
    pub async fn request_password_reset(&self, email: &str) -> CoreResult<()> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(());
        };

        let token = issue_reset_token(user.id, &self.config)
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        self.users.update_reset_token(user.id, Some(&token)).await?;
        self.notifier.deliver_reset_token(&user.email, &token).await?;

        Ok(())
    }

    /// 비밀번호 재설정 확인.
    ///
    /// 토큰이 검증 실패하거나, reset 용도가 아니거나, 사용자 레코드에
    /// 저장된 토큰과 다르면(새 토큰 발급으로 대체된 경우 포함)
    /// `InvalidToken`. 성공 시 해시를 교체하고 저장된 토큰을 비웁니다.
    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> CoreResult<()> {
        let token_data =
            decode_token(token, &self.config.secret).map_err(|_| CoreError::InvalidToken)?;

        if token_data.claims.purpose != TokenPurpose::Reset {
            return Err(CoreError::InvalidToken);
        }

        let user_id = token_data.claims.subject_id().map_err(|_| CoreError::InvalidToken)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        // 단일 사용 보장: 저장된 토큰과의 교차 검증
        if user.reset_token.as_deref() != Some(token) {
            return Err(CoreError::InvalidToken);
        }

        validate_password_strength(new_password).map_err(policy_violation)?;
        let hash = hash_password(new_password).map_err(|e| CoreError::Internal(e.to_string()))?;

        self.users.update_password_hash(user.id, &hash).await?;
        self.users.update_reset_token(user.id, None).await?;

        tracing::info!(user_id = user.id, "비밀번호 재설정 완료");
        Ok(())
    }

    /// 비밀번호 변경 (인증된 사용자).
    ///
    /// 현재 비밀번호가 일치하지 않으면 `InvalidCredentials`.
    /// 기발급 access/refresh 토큰은 만료까지 유효하게 남습니다.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> CoreResult<()> {
        if !verify_password(current_password, &user.password_hash) {
            return Err(CoreError::InvalidCredentials);
        }

        validate_password_strength(new_password).map_err(policy_violation)?;
        let hash = hash_password(new_password).map_err(|e| CoreError::Internal(e.to_string()))?;
        self.users.update_password_hash(user.id, &hash).await?;

        Ok(())
    }
}

fn policy_violation(err: PasswordError) -> CoreError {
    match err {
        PasswordError::TooWeak(msg) => CoreError::Validation(msg.to_string()),
        PasswordError::HashingFailed => CoreError::Internal(err.to_string()),
    }
}
