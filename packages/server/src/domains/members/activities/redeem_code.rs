//! Redeem invitation code action

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domains::members::types::RedemptionOutcome;
use crate::kernel::ServerDeps;

/// Bind an invitation code to the member that just activated with it.
///
/// Must only run after the profile activation succeeded. Idempotent for the
/// same code + member pair; a code already bound to a different member is a
/// failure (the caller reports partial success, since the member is active
/// by now).
pub async fn redeem_code(code: &str, member_id: Uuid, deps: &ServerDeps) -> Result<()> {
    match deps.directory.mark_code_redeemed(code, member_id).await? {
        RedemptionOutcome::Redeemed => {
            info!("Code {} redeemed by member {}", code, member_id);
            Ok(())
        }
        RedemptionOutcome::AlreadyRedeemed => {
            // Safe no-op: a retry of the same pair never double-charges.
            info!("Code {} was already redeemed by member {}", code, member_id);
            Ok(())
        }
        RedemptionOutcome::RedeemedByOther => {
            warn!("Code {} is already bound to a different member", code);
            anyhow::bail!("code {} already redeemed by another member", code)
        }
    }
}
