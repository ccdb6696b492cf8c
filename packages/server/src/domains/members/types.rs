//! Transient values passed between the activation pipeline steps.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invitation codes are fixed-width 10-character tokens.
pub const CODE_LENGTH: usize = 10;

/// A successfully resolved invitation code.
///
/// `level` is already the *activating* member's level (owner level,
/// normalized null -> 0, plus one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedCode {
    pub upline_user_id: Uuid,
    pub role: String,
    pub level: i32,
}

/// Fields stamped onto a member when it is activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfileUpdate {
    pub member_id: Uuid,
    pub upline_id: Uuid,
    pub level: i32,
    pub role: String,
}

/// Result of the guarded profile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdateOutcome {
    Updated,
    /// The member exists but is no longer `inactive` (lost the race to
    /// another activation).
    NotInactive,
    NotFound,
}

/// Result of marking an invitation code redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Redeemed,
    /// Same code + member pair as a previous call; safe no-op.
    AlreadyRedeemed,
    /// The code is already bound to a different member.
    RedeemedByOther,
}

/// One generation window handed to the external incentive engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveBatch {
    pub upline_id: Uuid,
    pub role: String,
    pub member_id: Uuid,
    pub code: String,
    pub from_generation: i32,
    pub to_generation: i32,
}

/// What the incentive engine reports per batch.
///
/// A present `next_generation` means more generations remain; absence means
/// the walk is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveBatchOutcome {
    pub next_generation: Option<i32>,
    pub message: Option<String>,
}

/// Pipeline stage at which side effects had already committed when a later
/// step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialStage {
    /// Member is active but the code was not marked redeemed.
    Redemption,
    /// Member is active and the code redeemed, but incentive payouts are
    /// incomplete.
    Incentives,
}

/// Terminal result of the activation workflow.
///
/// Clean failures (nothing committed) are reported as errors instead; both
/// variants here mean the member's visible status changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActivationOutcome {
    Completed {
        member_id: Uuid,
        incentive_batches: u32,
    },
    /// Earlier steps committed, a later one failed. Requires manual
    /// reconciliation; retrying the whole pipeline would hit the
    /// already-active guard.
    Partial {
        member_id: Uuid,
        stage: PartialStage,
        detail: String,
    },
}
