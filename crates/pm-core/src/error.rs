//! 백엔드 전반에서 사용되는 에러 타입.
//!
//! 모든 에러는 요청 단위로 종결됩니다. 내부 재시도는 없으며,
//! 재시도 정책은 호출자의 몫입니다.

use thiserror::Error;

/// 핵심 에러 분류.
///
/// 로그인/비밀번호 재설정 요청은 사용자 열거(enumeration) 방지를 위해
/// 서로 다른 내부 원인을 동일한 외부 메시지로 축약합니다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력 검증 실패 (약한 비밀번호, 잘못된 이메일 형식 등)
    #[error("입력 검증 실패: {0}")]
    Validation(String),

    /// 중복 등록 (이미 존재하는 이메일)
    #[error("이미 존재합니다: {0}")]
    Conflict(String),

    /// 잘못된 자격증명 (존재하지 않는 사용자와 잘못된 비밀번호를 구분하지 않음)
    #[error("이메일 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    /// 유효하지 않은 토큰 (서명 불량, 만료, 용도 불일치, 재설정 토큰 불일치)
    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,

    /// 인증 실패 (액세스 토큰 누락/만료 또는 비활성 사용자)
    #[error("인증 실패: {0}")]
    Unauthenticated(String),

    /// 인증은 되었으나 역할 권한 부족
    #[error("권한이 부족합니다")]
    Forbidden,

    /// 대상 엔티티 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 백엔드 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 호출자에게 그대로 노출 가능한 에러인지 확인합니다.
    ///
    /// Database/Internal은 상세 내용을 감추고 일반 메시지로 대체해야 합니다.
    pub fn is_client_facing(&self) -> bool {
        !matches!(self, CoreError::Database(_) | CoreError::Internal(_))
    }
}
