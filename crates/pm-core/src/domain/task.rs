//! 태스크 도메인 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 태스크 진행 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx-support", sqlx(type_name = "text", rename_all = "lowercase"))]
pub enum TaskStatus {
    /// 할 일
    Todo,
    /// 진행 중
    Doing,
    /// 완료
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// 문자열에서 상태 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Some(TaskStatus::Todo),
            "doing" => Some(TaskStatus::Doing),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        };
        write!(f, "{}", s)
    }
}

/// 태스크 레코드.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub project_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// 새 태스크 입력.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub project_id: i64,
}

/// 태스크 수정 입력 (부분 수정).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&TaskStatus::Doing).unwrap(), "\"doing\"");
        let parsed: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, TaskStatus::Done);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::parse("todo"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("DOING"), Some(TaskStatus::Doing));
        assert_eq!(TaskStatus::parse("archived"), None);
    }

    #[test]
    fn test_update_task_defaults_to_none() {
        let update: UpdateTask = serde_json::from_str("{}").unwrap();
        assert!(update.title.is_none());
        assert!(update.status.is_none());
    }
}
