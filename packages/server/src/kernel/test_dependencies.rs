// TestDependencies - mock implementations for testing
//
// Provides in-memory implementations of the kernel traits that record every
// call in a shared log, so tests can assert on call order across both
// pipeline seams (e.g. "redemption never ran because activation failed").

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::members::models::{InvitationCode, Member, MemberStatus};
use crate::domains::members::types::{
    IncentiveBatch, IncentiveBatchOutcome, MemberProfileUpdate, ProfileUpdateOutcome,
    RedemptionOutcome,
};
use crate::kernel::{BaseIncentiveEngine, BaseMemberDirectory};

// =============================================================================
// Shared call log
// =============================================================================

/// One recorded backend call, in the order the pipeline issued it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineCall {
    FindInvitationCode {
        code: String,
    },
    UpdateMemberProfile {
        member_id: Uuid,
    },
    MarkCodeRedeemed {
        code: String,
        member_id: Uuid,
    },
    ApplyReferralIncentives {
        from_generation: i32,
        to_generation: i32,
    },
}

/// Log shared between mocks so ordering is observable across seams
pub type CallLog = Arc<Mutex<Vec<PipelineCall>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

// =============================================================================
// Mock Member Directory
// =============================================================================

/// In-memory member/code directory with recorded calls
pub struct MockMemberDirectory {
    log: CallLog,
    members: Mutex<HashMap<Uuid, Member>>,
    codes: Mutex<HashMap<String, InvitationCode>>,
    fail_profile_updates: Mutex<Option<String>>,
    fail_redemptions: Mutex<Option<String>>,
}

impl MockMemberDirectory {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            members: Mutex::new(HashMap::new()),
            codes: Mutex::new(HashMap::new()),
            fail_profile_updates: Mutex::new(None),
            fail_redemptions: Mutex::new(None),
        }
    }

    /// Seed a member record
    pub fn with_member(self, member: Member) -> Self {
        self.members.lock().unwrap().insert(member.id, member);
        self
    }

    /// Seed an invitation code record
    pub fn with_code(self, code: InvitationCode) -> Self {
        self.codes.lock().unwrap().insert(code.code.clone(), code);
        self
    }

    /// Make every profile update fail with the given reason
    pub fn failing_profile_updates(self, reason: &str) -> Self {
        *self.fail_profile_updates.lock().unwrap() = Some(reason.to_string());
        self
    }

    /// Make every redemption fail with the given reason
    pub fn failing_redemptions(self, reason: &str) -> Self {
        *self.fail_redemptions.lock().unwrap() = Some(reason.to_string());
        self
    }

    /// Snapshot of all recorded calls, in order
    pub fn calls(&self) -> Vec<PipelineCall> {
        self.log.lock().unwrap().clone()
    }

    /// Current state of a seeded member
    pub fn member(&self, id: Uuid) -> Option<Member> {
        self.members.lock().unwrap().get(&id).cloned()
    }

    /// Current state of a seeded code
    pub fn code(&self, code: &str) -> Option<InvitationCode> {
        self.codes.lock().unwrap().get(code).cloned()
    }
}

#[async_trait]
impl BaseMemberDirectory for MockMemberDirectory {
    async fn find_invitation_code(&self, code: &str) -> Result<Option<InvitationCode>> {
        self.log
            .lock()
            .unwrap()
            .push(PipelineCall::FindInvitationCode {
                code: code.to_string(),
            });

        Ok(self.codes.lock().unwrap().get(code).cloned())
    }

    async fn update_member_profile(
        &self,
        update: &MemberProfileUpdate,
    ) -> Result<ProfileUpdateOutcome> {
        self.log
            .lock()
            .unwrap()
            .push(PipelineCall::UpdateMemberProfile {
                member_id: update.member_id,
            });

        if let Some(reason) = self.fail_profile_updates.lock().unwrap().clone() {
            anyhow::bail!("{}", reason);
        }

        let mut members = self.members.lock().unwrap();
        let Some(member) = members.get_mut(&update.member_id) else {
            return Ok(ProfileUpdateOutcome::NotFound);
        };
        if member.status != MemberStatus::Inactive {
            return Ok(ProfileUpdateOutcome::NotInactive);
        }

        member.status = MemberStatus::Active;
        member.upline_id = Some(update.upline_id);
        member.level = Some(update.level);
        member.role = Some(update.role.clone());

        Ok(ProfileUpdateOutcome::Updated)
    }

    async fn mark_code_redeemed(&self, code: &str, member_id: Uuid) -> Result<RedemptionOutcome> {
        self.log
            .lock()
            .unwrap()
            .push(PipelineCall::MarkCodeRedeemed {
                code: code.to_string(),
                member_id,
            });

        if let Some(reason) = self.fail_redemptions.lock().unwrap().clone() {
            anyhow::bail!("{}", reason);
        }

        let mut codes = self.codes.lock().unwrap();
        let Some(record) = codes.get_mut(code) else {
            anyhow::bail!("invitation code {} not found", code);
        };

        match record.redeemed_by {
            None => {
                record.redeemed_by = Some(member_id);
                Ok(RedemptionOutcome::Redeemed)
            }
            Some(existing) if existing == member_id => Ok(RedemptionOutcome::AlreadyRedeemed),
            Some(_) => Ok(RedemptionOutcome::RedeemedByOther),
        }
    }

    async fn list_members(&self, owner_id: Uuid) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.owner_id == owner_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.registered_at);
        Ok(members)
    }
}

// =============================================================================
// Mock Incentive Engine
// =============================================================================

/// Scripted incentive engine: queued outcomes are returned in order, then an
/// empty-cursor outcome once the queue runs dry
pub struct MockIncentiveEngine {
    log: CallLog,
    responses: Mutex<Vec<Result<IncentiveBatchOutcome, String>>>,
    batch_calls: Mutex<Vec<IncentiveBatch>>,
}

impl MockIncentiveEngine {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            responses: Mutex::new(Vec::new()),
            batch_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful outcome with a continuation cursor
    pub fn with_next_generation(self, next_generation: i32) -> Self {
        self.responses.lock().unwrap().push(Ok(IncentiveBatchOutcome {
            next_generation: Some(next_generation),
            message: None,
        }));
        self
    }

    /// Queue a successful terminal outcome (no cursor)
    pub fn with_walk_complete(self) -> Self {
        self.responses.lock().unwrap().push(Ok(IncentiveBatchOutcome {
            next_generation: None,
            message: None,
        }));
        self
    }

    /// Queue a failed batch
    pub fn with_failure(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(reason.to_string()));
        self
    }

    /// All batches the walker requested, with their arguments
    pub fn batch_calls(&self) -> Vec<IncentiveBatch> {
        self.batch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseIncentiveEngine for MockIncentiveEngine {
    async fn apply_referral_incentives(
        &self,
        batch: &IncentiveBatch,
    ) -> Result<IncentiveBatchOutcome> {
        self.log
            .lock()
            .unwrap()
            .push(PipelineCall::ApplyReferralIncentives {
                from_generation: batch.from_generation,
                to_generation: batch.to_generation,
            });
        self.batch_calls.lock().unwrap().push(batch.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(IncentiveBatchOutcome {
                next_generation: None,
                message: None,
            });
        }

        responses
            .remove(0)
            .map_err(|reason| anyhow::anyhow!("{}", reason))
    }
}
