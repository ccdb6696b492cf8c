//! Activate member workflow
//!
//! Orchestrates the referral activation pipeline:
//! 1. Resolve the invitation code (read-only, local format gate first)
//! 2. Activate the member profile (check-and-set on inactive)
//! 3. Mark the code redeemed
//! 4. Walk upline generations, applying incentives per batch
//!
//! The pipeline is NOT transactional. Steps 3 and 4 failing after step 2
//! committed yield a partial outcome, reported distinctly so operators do
//! not blindly retry an already-active member.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domains::members::activities;
use crate::domains::members::errors::ActivationError;
use crate::domains::members::types::{
    ActivationOutcome, MemberProfileUpdate, PartialStage,
};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateMemberRequest {
    pub member_id: Uuid,
    pub code: String,
}

/// Run the full activation pipeline for one member.
///
/// Each step only runs if the previous one succeeded. Clean failures
/// (nothing committed) come back as `Err`; once the profile update has
/// committed, later failures come back as `Ok(Partial { .. })`.
pub async fn activate_member(
    request: &ActivateMemberRequest,
    deps: &ServerDeps,
) -> Result<ActivationOutcome, ActivationError> {
    info!(
        member_id = %request.member_id,
        code = %request.code,
        "Starting member activation"
    );

    // Step 1: resolve the code (no side effects)
    let resolved = activities::resolve_invitation_code(&request.code, deps).await?;

    // Step 2: activate the profile (the only member mutation)
    let update = MemberProfileUpdate {
        member_id: request.member_id,
        upline_id: resolved.upline_user_id,
        level: resolved.level,
        role: resolved.role.clone(),
    };
    activities::activate_profile(&update, deps).await?;

    // Step 3: redeem the code. The member is active from here on, so a
    // failure is a partial outcome, not a clean error.
    if let Err(e) = activities::redeem_code(&request.code, request.member_id, deps).await {
        warn!(
            member_id = %request.member_id,
            error = %e,
            "Member activated but code redemption failed"
        );
        return Ok(ActivationOutcome::Partial {
            member_id: request.member_id,
            stage: PartialStage::Redemption,
            detail: e.to_string(),
        });
    }

    // Step 4: generational incentive walk. No rollback of steps 2/3 on
    // failure; already-applied batches stand.
    match activities::walk_incentives(
        resolved.upline_user_id,
        &resolved.role,
        request.member_id,
        &request.code,
        deps,
    )
    .await
    {
        Ok(incentive_batches) => {
            info!(
                member_id = %request.member_id,
                incentive_batches,
                "Member activation complete"
            );
            Ok(ActivationOutcome::Completed {
                member_id: request.member_id,
                incentive_batches,
            })
        }
        Err(e) => {
            warn!(
                member_id = %request.member_id,
                error = %e,
                "Member activated and code redeemed, but incentive walk failed"
            );
            Ok(ActivationOutcome::Partial {
                member_id: request.member_id,
                stage: PartialStage::Incentives,
                detail: e.to_string(),
            })
        }
    }
}
