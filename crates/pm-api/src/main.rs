//! 프로젝트 관리 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 인증(등록/로그인/토큰), 사용자/프로젝트/작업 관리 엔드포인트를 제공합니다.
//!
//! DATABASE_URL이 설정되어 있으면 PostgreSQL을, 없으면 인메모리 저장소를 사용합니다.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use pm_api::routes::create_api_router;
use pm_api::services::AuthService;
use pm_api::state::AppState;
use pm_api::repository::{PgProjectStore, PgTaskStore, PgUserStore};
use pm_core::{
    AuthConfig, DatabaseConfig, LogConfig, LogNotifier, ServerConfig,
};

/// AppState 생성.
///
/// DATABASE_URL이 있으면 PostgreSQL 저장소를, 없으면 인메모리 저장소를 사용합니다.
/// DB 연결 실패 시에는 인메모리로 대체하지 않고 에러를 반환합니다
/// (설정이 있는데 연결이 안 되면 운영자가 알아야 합니다).
async fn create_app_state(
    auth_config: AuthConfig,
    db_config: &DatabaseConfig,
) -> Result<AppState, sqlx::Error> {
    let Some(ref url) = db_config.url else {
        warn!("DATABASE_URL이 설정되지 않았습니다. 인메모리 저장소로 동작합니다 (재시작 시 데이터 소실).");
        return Ok(AppState::in_memory(auth_config));
    };

    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;
    info!(
        max_connections = db_config.max_connections,
        "PostgreSQL 연결 완료"
    );

    let users = Arc::new(PgUserStore::new(pool.clone()));
    let auth = AuthService::new(users.clone(), Arc::new(LogNotifier), auth_config);

    Ok(AppState::new(
        auth,
        users,
        Arc::new(PgProjectStore::new(pool.clone())),
        Arc::new(PgTaskStore::new(pool)),
    ))
}

/// CORS 레이어 생성.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("CORS_ORIGINS에 유효한 origin이 없습니다. 모든 origin을 허용합니다 (개발 모드).");
        AllowOrigin::any()
    } else {
        info!(count = origins.len(), "CORS origin 설정 완료");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 종료 시그널 대기 (SIGTERM/Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| error!(error = %e, "Ctrl+C 핸들러 설치 실패"));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!(error = %e, "SIGTERM 핸들러 설치 실패"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("종료 시그널 수신");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    pm_core::init_logging(LogConfig::from_env())?;

    info!("Starting PM API server...");

    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env();
    let db_config = DatabaseConfig::from_env();

    let addr = server_config.socket_addr().map_err(|e| {
        error!(
            host = %server_config.host,
            port = server_config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let state = Arc::new(create_app_state(auth_config, &db_config).await?);
    info!(version = %state.version, "Application state initialized");

    let app = create_api_router()
        .layer(cors_layer(&server_config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
