//! 도메인 모델.
//!
//! 사용자, 프로젝트, 태스크 및 collaborator trait 정의.

pub mod notifier;
pub mod project;
pub mod store;
pub mod task;
pub mod user;

pub use notifier::*;
pub use project::*;
pub use store::*;
pub use task::*;
pub use user::*;
