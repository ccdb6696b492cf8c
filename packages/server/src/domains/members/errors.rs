use thiserror::Error;

use super::types::CODE_LENGTH;

/// Clean activation failures: no member or code state changed, the operator
/// may retry immediately.
///
/// Partial failures (commits already happened) are not errors — they are
/// `ActivationOutcome::Partial` so callers cannot confuse them with a safe
/// retry.
#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("invitation code must be exactly {CODE_LENGTH} characters")]
    InvalidFormat,

    #[error("invitation code not found or no longer valid")]
    CodeNotFound,

    #[error("member is already active")]
    AlreadyActive,

    #[error("profile update failed: {0}")]
    ProfileUpdateFailed(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
