use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// InvitationCode model - SQL persistence layer
///
/// Issued by an external process; this service only reads codes and marks
/// them redeemed. `redeemed_by` goes null -> member id at most once.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct InvitationCode {
    pub code: String,
    pub owner_user_id: Uuid,
    pub package_identifier: String,
    pub level: Option<i32>,
    pub valid: bool,
    pub redeemed_by: Option<Uuid>,
    pub issued_at: DateTime<Utc>,
}

impl InvitationCode {
    /// Find a code record by its token
    pub async fn find_by_code(code: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM invitation_codes WHERE code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Mark a code redeemed by a member.
    ///
    /// Guarded so redemption is one-way: only an unredeemed row is updated.
    /// Returns `None` when the row was missing or already redeemed.
    pub async fn mark_redeemed(code: &str, member_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE invitation_codes
             SET redeemed_by = $2
             WHERE code = $1
               AND redeemed_by IS NULL
             RETURNING *",
        )
        .bind(code)
        .bind(member_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
