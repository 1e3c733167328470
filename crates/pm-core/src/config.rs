//! 설정 관리.
//!
//! 모든 설정은 프로세스 시작 시 한 번 로드되어 불변으로 취급되며,
//! 전역 조회 대신 명시적으로 주입됩니다. 서명 키나 TTL을 바꾸려면
//! 프로세스를 재시작해야 하며 이 경우 기존 토큰은 모두 무효화됩니다.

use serde::{Deserialize, Serialize};

/// 인증 설정.
///
/// 토큰 서명 키와 각 토큰 용도별 TTL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 서명 키 (프로세스 전역, 회전 없음)
    pub secret: String,
    /// 액세스 토큰 TTL (분)
    pub access_ttl_minutes: i64,
    /// 리프레시 토큰 TTL (분)
    pub refresh_ttl_minutes: i64,
    /// 재설정 토큰 TTL (분)
    pub reset_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "change-me".to_string(),
            access_ttl_minutes: 30,
            refresh_ttl_minutes: 60 * 24 * 30,
            reset_ttl_minutes: 30,
        }
    }
}

impl AuthConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// # 환경변수
    /// - `SECRET_KEY`: 서명 키
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: 액세스 토큰 TTL (기본 30분)
    /// - `REFRESH_TOKEN_EXPIRE_MINUTES`: 리프레시 토큰 TTL (기본 30일)
    pub fn from_env() -> Self {
        let default = Self::default();
        let secret = std::env::var("SECRET_KEY").unwrap_or(default.secret);
        if secret == "change-me" {
            tracing::warn!("SECRET_KEY가 설정되지 않았습니다. 운영 환경에서는 반드시 설정하세요.");
        }

        Self {
            secret,
            access_ttl_minutes: env_i64("ACCESS_TOKEN_EXPIRE_MINUTES", default.access_ttl_minutes),
            refresh_ttl_minutes: env_i64(
                "REFRESH_TOKEN_EXPIRE_MINUTES",
                default.refresh_ttl_minutes,
            ),
            reset_ttl_minutes: default.reset_ttl_minutes,
        }
    }
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용할 CORS origin (쉼표 구분)
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: "http://localhost:5173".to_string(),
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드 (`API_HOST`, `API_PORT`, `CORS_ORIGINS`).
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(default.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default.port),
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or(default.cors_origins),
        }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// 연결 URL. 없으면 인메모리 저장소로 동작합니다.
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 환경 변수에서 설정 로드 (`DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`).
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
