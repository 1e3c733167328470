//! 저장소 구현.
//!
//! `pm-core`의 저장소 trait에 대한 두 구현을 제공합니다:
//! - [`postgres`]: sqlx 기반 PostgreSQL 구현 (운영용)
//! - [`memory`]: `RwLock<HashMap>` 기반 인메모리 구현 (개발/테스트용)

pub mod memory;
pub mod postgres;

pub use memory::{MemoryProjectStore, MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgProjectStore, PgTaskStore, PgUserStore};
