//! 사용자(Principal) 및 역할 정의.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 역할은 순서 없는 평면 집합입니다. 보호된 작업마다 허용 역할을
/// 명시적으로 열거하며, 암묵적인 상하 관계는 없습니다
/// (예: admin이라고 해서 manager 전용 게이트를 자동 통과하지 않음).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx-support", sqlx(type_name = "text", rename_all = "lowercase"))]
pub enum Role {
    /// 일반 사용자
    User,
    /// 매니저 - 프로젝트 생성/수정 권한
    Manager,
    /// 관리자 - 사용자 관리 및 삭제 권한
    Admin,
}

impl Role {
    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

/// 사용자 레코드 (Principal).
///
/// 이메일은 대소문자 구분 정확 일치(exact match) 고유 키입니다.
/// `reset_token`은 한 번에 최대 하나의 미사용 재설정 토큰만 보관하며,
/// 새 토큰 발급 시 이전 값을 덮어쓰고 성공적인 확인 시 비웁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2id 해시 (PHC 문자열) - 응답에 직렬화하지 않음
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
}

impl User {
    /// 공개 프로필로 변환합니다.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// API 응답용 공개 사용자 프로필.
///
/// 비밀번호 해시와 재설정 토큰은 절대 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

/// 새 사용자 입력.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");

        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_public_user_hides_secrets() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::User,
            is_active: true,
            reset_token: Some("secret-token".to_string()),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("secret-token"));

        let public = user.to_public();
        assert_eq!(public.email, "a@x.com");
        assert_eq!(public.role, Role::User);
    }
}
