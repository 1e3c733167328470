//! JWT 토큰 처리.
//!
//! Access / Refresh / Reset 토큰 생성 및 검증 로직.
//!
//! 모든 토큰은 용도 태그(`purpose`)를 내장하며, 소비자는 서명 검증과
//! 별개로 용도를 반드시 확인해야 합니다. 이는 토큰 치환 공격
//! (예: access 토큰이 기대되는 곳에 refresh 토큰 제시)을 차단합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use pm_core::{AuthConfig, Role, User};

/// 토큰 용도 구분자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// 짧은 TTL, 역할 스냅샷 포함
    Access,
    /// 긴 TTL, 역할 미포함
    Refresh,
    /// 고정 TTL, 단일 사용 (사용자 레코드와 교차 검증)
    Reset,
}

/// JWT 페이로드.
///
/// 액세스 토큰의 역할은 발급 시점의 스냅샷입니다. 검증 시 현재 역할과
/// 대조하지 않으므로, 역할 변경 후에도 토큰 만료까지는 이전 역할이
/// 유지될 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID (문자열 인코딩)
    pub sub: String,
    /// 토큰 용도
    pub purpose: TokenPurpose,
    /// 사용자 역할 (access 토큰에만 존재)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `purpose` - 토큰 용도
    /// * `role` - 역할 스냅샷 (access 토큰에만 Some)
    /// * `ttl_minutes` - 만료 시간 (분)
    pub fn new(user_id: i64, purpose: TokenPurpose, role: Option<Role>, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            purpose,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// subject를 사용자 ID로 파싱합니다.
    pub fn subject_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

/// Access Token + Refresh Token 페어.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access Token
    pub access_token: String,
    /// Refresh Token
    pub refresh_token: String,
    /// 토큰 타입 (항상 "bearer")
    pub token_type: String,
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    Expired,
    #[error("유효하지 않은 토큰")]
    Invalid,
}

/// 서명된 토큰 생성.
///
/// HS256 대칭 키 서명. 서명 키는 프로세스 전역 설정에서 한 번 로드되며
/// 토큰별 키 회전은 없습니다.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::from)
}

/// JWT 토큰 디코딩 및 검증.
///
/// 만료 시각이 지난 토큰은 [`TokenError::Expired`],
/// 서명 불량/구조 불량은 [`TokenError::Invalid`]로 실패합니다.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // 만료 판정을 결정적으로 만들기 위해 leeway 없이 검증
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

/// Access + Refresh 토큰 쌍 발급.
///
/// 항상 새로 발급하며(rotation), 이전 토큰의 만료 시각을 재사용하지
/// 않습니다. access 토큰에만 역할 스냅샷이 실립니다.
pub fn issue_token_pair(user: &User, config: &AuthConfig) -> Result<TokenPair, TokenError> {
    let access_claims = Claims::new(
        user.id,
        TokenPurpose::Access,
        Some(user.role),
        config.access_ttl_minutes,
    );
    let refresh_claims = Claims::new(
        user.id,
        TokenPurpose::Refresh,
        None,
        config.refresh_ttl_minutes,
    );

    Ok(TokenPair {
        access_token: create_token(&access_claims, &config.secret)?,
        refresh_token: create_token(&refresh_claims, &config.secret)?,
        token_type: "bearer".to_string(),
    })
}

/// 비밀번호 재설정 토큰 발급.
pub fn issue_reset_token(user_id: i64, config: &AuthConfig) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, TokenPurpose::Reset, None, config.reset_ttl_minutes);
    create_token(&claims, &config.secret)
}
