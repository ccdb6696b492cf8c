//! Activate member profile action

use tracing::{error, info};

use crate::domains::members::errors::ActivationError;
use crate::domains::members::types::{MemberProfileUpdate, ProfileUpdateOutcome};
use crate::kernel::ServerDeps;

/// Flip a member to active, stamping upline/level/role from the resolved
/// code.
///
/// Precondition: the code already resolved; no re-validation happens here.
/// Any failure is fatal to the pipeline - nothing downstream runs.
pub async fn activate_profile(
    update: &MemberProfileUpdate,
    deps: &ServerDeps,
) -> Result<(), ActivationError> {
    info!(
        member_id = %update.member_id,
        upline_id = %update.upline_id,
        level = update.level,
        "Activating member profile"
    );

    let outcome = deps
        .directory
        .update_member_profile(update)
        .await
        .map_err(|e| {
            error!("Profile update failed for {}: {}", update.member_id, e);
            ActivationError::Internal(e)
        })?;

    match outcome {
        ProfileUpdateOutcome::Updated => {
            info!("Member activated: {}", update.member_id);
            Ok(())
        }
        ProfileUpdateOutcome::NotInactive => {
            // Another activation won the race; nothing was overwritten.
            info!("Member {} is no longer inactive", update.member_id);
            Err(ActivationError::AlreadyActive)
        }
        ProfileUpdateOutcome::NotFound => Err(ActivationError::ProfileUpdateFailed(format!(
            "member not found: {}",
            update.member_id
        ))),
    }
}
