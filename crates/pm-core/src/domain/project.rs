//! 프로젝트 도메인 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 프로젝트 레코드.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 새 프로젝트 입력.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 프로젝트 수정 입력.
///
/// 원본 시스템과 동일하게 전체 교체(PUT) 의미론을 따릅니다.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
