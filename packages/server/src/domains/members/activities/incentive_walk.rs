//! Generational incentive walk action

use anyhow::Result;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domains::members::types::IncentiveBatch;
use crate::kernel::ServerDeps;

/// Generations covered by one call to the incentive engine. Bounds the cost
/// of a single payout computation and lets the engine paginate arbitrarily
/// deep referral trees.
pub const GENERATIONS_PER_BATCH: i32 = 3;

/// Safety net against an engine that keeps returning a cursor forever.
pub const MAX_WALK_BATCHES: u32 = 1000;

/// Walk upline generations in fixed windows, applying referral incentives
/// per batch until the engine stops returning a continuation cursor.
///
/// The engine owns all ledger mutations. A failed batch aborts the walk and
/// leaves earlier batches standing; the member stays active and the code
/// stays redeemed.
///
/// Returns the number of batches applied.
pub async fn walk_incentives(
    upline_id: Uuid,
    role: &str,
    member_id: Uuid,
    code: &str,
    deps: &ServerDeps,
) -> Result<u32> {
    let mut current_generation = 1;
    let mut batches = 0u32;

    loop {
        if batches >= MAX_WALK_BATCHES {
            anyhow::bail!(
                "incentive walk exceeded {} batches without completing",
                MAX_WALK_BATCHES
            );
        }

        let batch = IncentiveBatch {
            upline_id,
            role: role.to_string(),
            member_id,
            code: code.to_string(),
            from_generation: current_generation,
            to_generation: current_generation + GENERATIONS_PER_BATCH - 1,
        };

        debug!(
            "Applying incentive batch for generations {}-{}",
            batch.from_generation, batch.to_generation
        );

        let outcome = deps.incentives.apply_referral_incentives(&batch).await?;
        batches += 1;

        match outcome.next_generation {
            None => {
                info!(
                    "Incentive walk complete for member {} after {} batch(es)",
                    member_id, batches
                );
                return Ok(batches);
            }
            Some(next) if next <= current_generation => {
                // A cursor that does not advance would loop forever.
                anyhow::bail!(
                    "incentive engine returned non-advancing cursor {} (current generation {})",
                    next,
                    current_generation
                );
            }
            Some(next) => current_generation = next,
        }
    }
}
