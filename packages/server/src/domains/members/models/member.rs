use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Member lifecycle status.
///
/// Members are created `inactive` by the registration flow; this service
/// only ever flips them to `active`.
#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "member_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

/// Member model - SQL persistence layer
///
/// `role`, `upline_id` and `level` stay null until activation stamps them
/// from a resolved invitation code.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Member {
    pub id: Uuid,
    pub nice_name: String,
    pub email: String,

    // Referral placement (stamped at activation)
    pub role: Option<String>,
    pub upline_id: Option<Uuid>,
    pub level: Option<i32>,

    // Business profile
    pub business_name: Option<String>,
    pub business_address: Option<String>,

    pub status: MemberStatus,
    pub owner_id: Uuid,
    pub registered_at: DateTime<Utc>,
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find all members listed under an owner/admin, in registration order
    pub async fn find_by_owner(owner_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM members WHERE owner_id = $1 ORDER BY registered_at ASC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new member
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (
                id,
                nice_name,
                email,
                role,
                upline_id,
                level,
                business_name,
                business_address,
                status,
                owner_id
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.nice_name)
        .bind(&self.email)
        .bind(&self.role)
        .bind(self.upline_id)
        .bind(self.level)
        .bind(&self.business_name)
        .bind(&self.business_address)
        .bind(self.status)
        .bind(self.owner_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Activate a member, stamping its referral placement.
    ///
    /// Check-and-set: only succeeds while the member is still `inactive`,
    /// so two concurrent activations cannot both win. Returns `None` when
    /// the row was not updated (missing or not inactive).
    pub async fn activate(
        id: Uuid,
        upline_id: Uuid,
        level: i32,
        role: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE members
             SET status = 'active', upline_id = $2, level = $3, role = $4
             WHERE id = $1
               AND status = 'inactive'
             RETURNING *",
        )
        .bind(id)
        .bind(upline_id)
        .bind(level)
        .bind(role)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_struct() {
        // Just verify struct compiles
        let member = Member {
            id: Uuid::new_v4(),
            nice_name: "Amina's Corner Store".to_string(),
            email: "amina@example.org".to_string(),
            role: None,
            upline_id: None,
            level: None,
            business_name: Some("Amina's Corner Store".to_string()),
            business_address: Some("12 Market Rd".to_string()),
            status: MemberStatus::Inactive,
            owner_id: Uuid::new_v4(),
            registered_at: Utc::now(),
        };

        assert_eq!(member.status, MemberStatus::Inactive);
    }
}
