//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use pm_core::{AuthConfig, LogNotifier, ProjectStore, TaskStore, UserStore};

use crate::repository::{MemoryProjectStore, MemoryTaskStore, MemoryUserStore};
use crate::services::AuthService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 인증 플로우 서비스 - 등록/로그인/리프레시/재설정/변경
    pub auth: AuthService,

    /// 사용자 저장소
    pub users: Arc<dyn UserStore>,

    /// 프로젝트 저장소
    pub projects: Arc<dyn ProjectStore>,

    /// 태스크 저장소
    pub tasks: Arc<dyn TaskStore>,

    /// API 버전
    pub version: String,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 주어진 collaborator들로 상태를 구성합니다.
    pub fn new(
        auth: AuthService,
        users: Arc<dyn UserStore>,
        projects: Arc<dyn ProjectStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            auth,
            users,
            projects,
            tasks,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 인메모리 저장소 기반 상태 생성.
    ///
    /// DATABASE_URL이 없는 개발 환경과 테스트에서 사용합니다.
    pub fn in_memory(config: AuthConfig) -> Self {
        let users: Arc<MemoryUserStore> = Arc::new(MemoryUserStore::new());
        let auth = AuthService::new(users.clone(), Arc::new(LogNotifier), config);

        Self::new(
            auth,
            users,
            Arc::new(MemoryProjectStore::new()),
            Arc::new(MemoryTaskStore::new()),
        )
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
