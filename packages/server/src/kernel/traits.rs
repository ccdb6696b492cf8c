// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "resolve this code") lives in domain activities
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMemberDirectory)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::members::models::{InvitationCode, Member};
use crate::domains::members::types::{
    IncentiveBatch, IncentiveBatchOutcome, MemberProfileUpdate, ProfileUpdateOutcome,
    RedemptionOutcome,
};

// =============================================================================
// Member Directory Trait (Infrastructure - member/code records)
// =============================================================================

#[async_trait]
pub trait BaseMemberDirectory: Send + Sync {
    /// Look up an invitation code record by its token
    async fn find_invitation_code(&self, code: &str) -> Result<Option<InvitationCode>>;

    /// Flip a member to active and stamp its referral placement.
    /// Must be check-and-set on `status = inactive`.
    async fn update_member_profile(
        &self,
        update: &MemberProfileUpdate,
    ) -> Result<ProfileUpdateOutcome>;

    /// Bind an invitation code to the member that redeemed it.
    /// Idempotent for the same code + member pair.
    async fn mark_code_redeemed(&self, code: &str, member_id: Uuid) -> Result<RedemptionOutcome>;

    /// All members listed under an owner/admin, in registration order
    async fn list_members(&self, owner_id: Uuid) -> Result<Vec<Member>>;
}

// =============================================================================
// Incentive Engine Trait (Infrastructure - external payout service)
// =============================================================================

#[async_trait]
pub trait BaseIncentiveEngine: Send + Sync {
    /// Apply referral incentives for one generation window.
    ///
    /// The engine owns all ledger mutations; callers only see the outcome
    /// and an optional continuation cursor.
    async fn apply_referral_incentives(
        &self,
        batch: &IncentiveBatch,
    ) -> Result<IncentiveBatchOutcome>;
}
