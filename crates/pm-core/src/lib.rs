//! # PM Core
//!
//! 프로젝트/태스크 관리 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자(Principal) 및 역할 정의
//! - 프로젝트/태스크 도메인 모델
//! - 저장소(Store) 및 알림 collaborator trait
//! - 에러 타입 분류
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
