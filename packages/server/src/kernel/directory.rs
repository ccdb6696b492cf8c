//! Postgres-backed implementation of `BaseMemberDirectory`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::members::models::{InvitationCode, Member, MemberStatus};
use crate::domains::members::types::{
    MemberProfileUpdate, ProfileUpdateOutcome, RedemptionOutcome,
};
use crate::kernel::BaseMemberDirectory;

/// Member directory over the service's own Postgres database.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseMemberDirectory for PostgresDirectory {
    async fn find_invitation_code(&self, code: &str) -> Result<Option<InvitationCode>> {
        InvitationCode::find_by_code(code, &self.pool).await
    }

    async fn update_member_profile(
        &self,
        update: &MemberProfileUpdate,
    ) -> Result<ProfileUpdateOutcome> {
        let updated = Member::activate(
            update.member_id,
            update.upline_id,
            update.level,
            &update.role,
            &self.pool,
        )
        .await?;

        if updated.is_some() {
            return Ok(ProfileUpdateOutcome::Updated);
        }

        // Guarded update hit nothing: distinguish a missing member from one
        // that already left `inactive`.
        match Member::find_by_id(update.member_id, &self.pool).await? {
            Some(member) if member.status == MemberStatus::Active => {
                Ok(ProfileUpdateOutcome::NotInactive)
            }
            Some(member) => anyhow::bail!("activation of member {} had no effect", member.id),
            None => Ok(ProfileUpdateOutcome::NotFound),
        }
    }

    async fn mark_code_redeemed(&self, code: &str, member_id: Uuid) -> Result<RedemptionOutcome> {
        if InvitationCode::mark_redeemed(code, member_id, &self.pool)
            .await?
            .is_some()
        {
            return Ok(RedemptionOutcome::Redeemed);
        }

        // Row untouched: either already redeemed or the code vanished.
        match InvitationCode::find_by_code(code, &self.pool).await? {
            Some(record) if record.redeemed_by == Some(member_id) => {
                Ok(RedemptionOutcome::AlreadyRedeemed)
            }
            Some(record) if record.redeemed_by.is_some() => Ok(RedemptionOutcome::RedeemedByOther),
            Some(_) => anyhow::bail!("code {} redemption update had no effect", code),
            None => anyhow::bail!("invitation code {} disappeared during redemption", code),
        }
    }

    async fn list_members(&self, owner_id: Uuid) -> Result<Vec<Member>> {
        Member::find_by_owner(owner_id, &self.pool).await
    }
}
