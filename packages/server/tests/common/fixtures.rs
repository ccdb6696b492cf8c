// Record builders for pipeline tests

use chrono::Utc;
use referral_core::domains::members::models::{InvitationCode, Member, MemberStatus};
use uuid::Uuid;

/// A freshly registered, still-inactive member
pub fn inactive_member(id: Uuid, owner_id: Uuid) -> Member {
    Member {
        id,
        nice_name: "Test Retailer".to_string(),
        email: "retailer@example.org".to_string(),
        role: None,
        upline_id: None,
        level: None,
        business_name: Some("Test Retail Co".to_string()),
        business_address: None,
        status: MemberStatus::Inactive,
        owner_id,
        registered_at: Utc::now(),
    }
}

/// A member that already completed activation
pub fn active_member(id: Uuid, owner_id: Uuid) -> Member {
    let mut member = inactive_member(id, owner_id);
    member.status = MemberStatus::Active;
    member.role = Some("Elite_Distributor_Package".to_string());
    member.level = Some(3);
    member
}

/// An unredeemed invitation code
pub fn invitation_code(code: &str, owner_user_id: Uuid, level: Option<i32>) -> InvitationCode {
    InvitationCode {
        code: code.to_string(),
        owner_user_id,
        package_identifier: "Elite_Distributor_Package".to_string(),
        level,
        valid: true,
        redeemed_by: None,
        issued_at: Utc::now(),
    }
}
