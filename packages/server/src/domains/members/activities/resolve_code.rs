//! Resolve invitation code action

use tracing::{debug, info};

use crate::domains::members::errors::ActivationError;
use crate::domains::members::types::{ResolvedCode, CODE_LENGTH};
use crate::kernel::ServerDeps;

/// Resolve an invitation code to the upline placement it grants.
///
/// Malformed codes are rejected locally before any backend call. A missing
/// record, or one whose validity flag is off, resolves to `CodeNotFound`.
/// Read-only: nothing is mutated here.
pub async fn resolve_invitation_code(
    code: &str,
    deps: &ServerDeps,
) -> Result<ResolvedCode, ActivationError> {
    // Cheap local gate: codes are fixed-width tokens
    if code.chars().count() != CODE_LENGTH {
        debug!("Rejecting malformed invitation code ({} chars)", code.len());
        return Err(ActivationError::InvalidFormat);
    }

    let record = deps
        .directory
        .find_invitation_code(code)
        .await
        .map_err(ActivationError::Internal)?;

    let Some(record) = record.filter(|r| r.valid) else {
        info!("Invitation code not found or invalid: {}", code);
        return Err(ActivationError::CodeNotFound);
    };

    // A top-of-chain owner has no level yet; normalize null -> 0 so the
    // activating member gets level 1, never null.
    let level = record.level.unwrap_or(0) + 1;

    debug!(
        "Resolved code {} -> upline {} at level {}",
        code, record.owner_user_id, level
    );

    Ok(ResolvedCode {
        upline_user_id: record.owner_user_id,
        role: record.package_identifier,
        level,
    })
}
