//! Member routes: activation and listing

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::domains::members::models::{Member, MemberStatus};
use crate::domains::members::workflows::{activate_member, ActivateMemberRequest};
use crate::domains::members::{ActivationError, ActivationOutcome, PartialStage};
use crate::server::app::AppState;

// ============================================================================
// POST /members/{id}/activate
// ============================================================================

#[derive(Deserialize)]
pub struct ActivateMemberBody {
    pub code: String,
}

#[derive(Serialize)]
pub struct ActivateMemberResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<PartialStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    incentive_batches: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Run the activation pipeline for a member.
///
/// 200 `activated` or `activated_with_warnings` means the member's visible
/// status changed and clients should refresh their member list; 4xx/5xx
/// means nothing committed.
pub async fn activate_member_handler(
    Extension(state): Extension<AppState>,
    Path(member_id): Path<Uuid>,
    Json(body): Json<ActivateMemberBody>,
) -> (StatusCode, Json<ActivateMemberResponse>) {
    let request = ActivateMemberRequest {
        member_id,
        code: body.code,
    };

    match activate_member(&request, &state.server_deps).await {
        Ok(ActivationOutcome::Completed {
            member_id,
            incentive_batches,
        }) => (
            StatusCode::OK,
            Json(ActivateMemberResponse {
                status: "activated".to_string(),
                member_id: Some(member_id),
                stage: None,
                incentive_batches: Some(incentive_batches),
                message: None,
            }),
        ),
        Ok(ActivationOutcome::Partial {
            member_id,
            stage,
            detail,
        }) => (
            StatusCode::OK,
            Json(ActivateMemberResponse {
                status: "activated_with_warnings".to_string(),
                member_id: Some(member_id),
                stage: Some(stage),
                incentive_batches: None,
                message: Some(detail),
            }),
        ),
        Err(e) => {
            let status_code = match &e {
                ActivationError::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
                ActivationError::CodeNotFound => StatusCode::NOT_FOUND,
                ActivationError::AlreadyActive => StatusCode::CONFLICT,
                ActivationError::ProfileUpdateFailed(_) | ActivationError::Internal(_) => {
                    error!(member_id = %member_id, error = %e, "Activation failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (
                status_code,
                Json(ActivateMemberResponse {
                    status: "failed".to_string(),
                    member_id: None,
                    stage: None,
                    incentive_batches: None,
                    message: Some(e.to_string()),
                }),
            )
        }
    }
}

// ============================================================================
// GET /members?owner_id=...
// ============================================================================

#[derive(Deserialize)]
pub struct ListMembersQuery {
    pub owner_id: Uuid,
}

/// JSON view of a member record
#[derive(Serialize)]
pub struct MemberView {
    pub id: Uuid,
    pub nice_name: String,
    pub email: String,
    pub role: Option<String>,
    pub upline_id: Option<Uuid>,
    pub level: Option<i32>,
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub status: MemberStatus,
    pub registered_at: DateTime<Utc>,
}

impl From<Member> for MemberView {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            nice_name: member.nice_name,
            email: member.email,
            role: member.role,
            upline_id: member.upline_id,
            level: member.level,
            business_name: member.business_name,
            business_address: member.business_address,
            status: member.status,
            registered_at: member.registered_at,
        }
    }
}

/// List an owner's members in registration order
pub async fn list_members_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> Result<Json<Vec<MemberView>>, StatusCode> {
    let members = state
        .server_deps
        .directory
        .list_members(query.owner_id)
        .await
        .map_err(|e| {
            error!(owner_id = %query.owner_id, error = %e, "Failed to list members");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(members.into_iter().map(MemberView::from).collect()))
}
