//! 영속 저장소 collaborator trait.
//!
//! 영속 계층을 호출부에서 분리하기 위한 저장소 중립적인 인터페이스를
//! 제공합니다. 구현체는 요청 범위 내에서 read-your-writes 일관성을
//! 보장해야 합니다.
//!
//! 동일 사용자에 대한 동시 재설정 토큰 갱신은 last-write-wins로
//! 수용합니다 (compare-and-swap 없음). 최악의 경우 동시 확인 중
//! 하나가 `InvalidToken`으로 실패합니다.

use async_trait::async_trait;

use super::{
    NewProject, NewTask, NewUser, Project, Role, Task, TaskStatus, UpdateProject, UpdateTask, User,
};
use crate::error::CoreResult;

/// 사용자 저장소 trait.
///
/// 이메일 조회는 대소문자 구분 정확 일치입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자 조회 (정확 일치).
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: i64) -> CoreResult<Option<User>>;

    /// 새 사용자 삽입. 이메일 중복 시 `CoreError::Conflict`.
    async fn insert(&self, new_user: NewUser) -> CoreResult<User>;

    /// 전체 사용자 목록 (ID 오름차순).
    async fn list(&self) -> CoreResult<Vec<User>>;

    /// 역할 변경. 대상이 없으면 `None`.
    async fn update_role(&self, id: i64, role: Role) -> CoreResult<Option<User>>;

    /// 비밀번호 해시 교체.
    async fn update_password_hash(&self, id: i64, hash: &str) -> CoreResult<()>;

    /// 재설정 토큰 저장/삭제. `None`이면 비웁니다.
    async fn update_reset_token(&self, id: i64, token: Option<&str>) -> CoreResult<()>;
}

/// 프로젝트 저장소 trait.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// 프로젝트 목록 (생성일 내림차순).
    ///
    /// `q`가 주어지면 이름에 대한 대소문자 무시 부분 일치로 필터링합니다.
    async fn list(&self, q: Option<&str>) -> CoreResult<Vec<Project>>;

    /// 새 프로젝트 생성.
    async fn insert(&self, new_project: NewProject) -> CoreResult<Project>;

    /// 프로젝트 수정. 대상이 없으면 `None`.
    async fn update(&self, id: i64, update: UpdateProject) -> CoreResult<Option<Project>>;

    /// 프로젝트 삭제. 삭제되었으면 `true`.
    async fn delete(&self, id: i64) -> CoreResult<bool>;
}

/// 태스크 저장소 trait.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 태스크 목록 (생성일 내림차순). 상태/프로젝트로 필터링 가능.
    async fn list(
        &self,
        status: Option<TaskStatus>,
        project_id: Option<i64>,
    ) -> CoreResult<Vec<Task>>;

    /// 새 태스크 생성. 소유자는 호출한 사용자입니다.
    async fn insert(&self, owner_id: i64, new_task: NewTask) -> CoreResult<Task>;

    /// 태스크 부분 수정. 대상이 없으면 `None`.
    async fn update(&self, id: i64, update: UpdateTask) -> CoreResult<Option<Task>>;

    /// 태스크 삭제. 삭제되었으면 `true`.
    async fn delete(&self, id: i64) -> CoreResult<bool>;
}
