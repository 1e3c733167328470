//! 재설정 토큰 전달 collaborator.
//!
//! 비밀번호 재설정 토큰의 out-of-band 전달을 추상화합니다.
//! 전송 수단(이메일 등)은 이 trait의 관심사가 아닙니다.

use async_trait::async_trait;

use crate::error::CoreResult;

/// 재설정 토큰 전달기 trait.
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    /// 수신자에게 재설정 토큰을 전달합니다.
    async fn deliver_reset_token(&self, recipient: &str, token: &str) -> CoreResult<()>;
}

/// 로그로만 전달하는 기본 구현.
///
/// 메일 전송 인프라가 없는 개발/데모 환경용입니다.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl ResetNotifier for LogNotifier {
    async fn deliver_reset_token(&self, recipient: &str, token: &str) -> CoreResult<()> {
        tracing::info!(recipient, token, "비밀번호 재설정 토큰 발급");
        Ok(())
    }
}
