//! Integration tests for the referral activation pipeline.
//!
//! All backing services run as in-memory mocks sharing one call log, so the
//! tests can assert both final record state and the exact order in which
//! the pipeline hit each seam.

mod common;

use common::{fixtures, TestPipeline};
use referral_core::domains::members::models::MemberStatus;
use referral_core::domains::members::types::{ActivationOutcome, PartialStage};
use referral_core::domains::members::workflows::{activate_member, ActivateMemberRequest};
use referral_core::domains::members::ActivationError;
use referral_core::kernel::test_dependencies::PipelineCall;
use uuid::Uuid;

const CODE: &str = "AB12CD34EF";

fn member_id() -> Uuid {
    Uuid::from_u128(42)
}

fn owner_id() -> Uuid {
    Uuid::from_u128(7)
}

fn admin_id() -> Uuid {
    Uuid::from_u128(1)
}

fn request() -> ActivateMemberRequest {
    ActivateMemberRequest {
        member_id: member_id(),
        code: CODE.to_string(),
    }
}

// ============================================================================
// Full pipeline success
// ============================================================================

#[tokio::test]
async fn test_activation_stamps_profile_and_redeems_code() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
        },
        |e| e.with_walk_complete(),
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    assert!(matches!(
        outcome,
        ActivationOutcome::Completed {
            incentive_batches: 1,
            ..
        }
    ));

    // Member 42: active, placed under owner 7 at level 3 with the package role
    let member = pipeline.directory.member(member_id()).unwrap();
    assert_eq!(member.status, MemberStatus::Active);
    assert_eq!(member.upline_id, Some(owner_id()));
    assert_eq!(member.level, Some(3));
    assert_eq!(member.role.as_deref(), Some("Elite_Distributor_Package"));

    // Code bound to the activating member
    let code = pipeline.directory.code(CODE).unwrap();
    assert_eq!(code.redeemed_by, Some(member_id()));

    // Exact call order across both seams
    let calls = pipeline.log.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            PipelineCall::FindInvitationCode {
                code: CODE.to_string()
            },
            PipelineCall::UpdateMemberProfile {
                member_id: member_id()
            },
            PipelineCall::MarkCodeRedeemed {
                code: CODE.to_string(),
                member_id: member_id()
            },
            PipelineCall::ApplyReferralIncentives {
                from_generation: 1,
                to_generation: 3
            },
        ]
    );
}

#[tokio::test]
async fn test_walker_follows_cursor_then_stops() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
        },
        // First batch says "continue at generation 4", second has no cursor
        |e| e.with_next_generation(4).with_walk_complete(),
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    assert!(matches!(
        outcome,
        ActivationOutcome::Completed {
            incentive_batches: 2,
            ..
        }
    ));

    let windows: Vec<(i32, i32)> = pipeline
        .engine
        .batch_calls()
        .iter()
        .map(|b| (b.from_generation, b.to_generation))
        .collect();
    assert_eq!(windows, vec![(1, 3), (4, 6)]);
}

// ============================================================================
// Clean failures (nothing committed)
// ============================================================================

#[tokio::test]
async fn test_malformed_code_makes_zero_backend_calls() {
    let pipeline = TestPipeline::build(
        |d| d.with_member(fixtures::inactive_member(member_id(), admin_id())),
        |e| e,
    );

    let result = activate_member(
        &ActivateMemberRequest {
            member_id: member_id(),
            code: "SHORT".to_string(),
        },
        &pipeline.deps,
    )
    .await;

    assert!(matches!(result, Err(ActivationError::InvalidFormat)));
    assert!(pipeline.log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_code_stops_before_any_mutation() {
    let pipeline = TestPipeline::build(
        |d| d.with_member(fixtures::inactive_member(member_id(), admin_id())),
        |e| e,
    );

    let result = activate_member(&request(), &pipeline.deps).await;

    assert!(matches!(result, Err(ActivationError::CodeNotFound)));

    let calls = pipeline.log.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![PipelineCall::FindInvitationCode {
            code: CODE.to_string()
        }]
    );
    // Member untouched
    let member = pipeline.directory.member(member_id()).unwrap();
    assert_eq!(member.status, MemberStatus::Inactive);
}

#[tokio::test]
async fn test_failed_activation_skips_redemption_and_walk() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
                .failing_profile_updates("storage unavailable")
        },
        |e| e,
    );

    let result = activate_member(&request(), &pipeline.deps).await;

    assert!(matches!(result, Err(ActivationError::Internal(_))));

    let calls = pipeline.log.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[1], PipelineCall::UpdateMemberProfile { .. }));
    assert!(!calls
        .iter()
        .any(|c| matches!(c, PipelineCall::MarkCodeRedeemed { .. })));
    assert!(!calls
        .iter()
        .any(|c| matches!(c, PipelineCall::ApplyReferralIncentives { .. })));

    // Code still unredeemed
    assert_eq!(pipeline.directory.code(CODE).unwrap().redeemed_by, None);
}

#[tokio::test]
async fn test_unknown_member_fails_cleanly() {
    let pipeline = TestPipeline::build(
        |d| d.with_code(fixtures::invitation_code(CODE, owner_id(), Some(2))),
        |e| e,
    );

    let result = activate_member(&request(), &pipeline.deps).await;

    assert!(matches!(
        result,
        Err(ActivationError::ProfileUpdateFailed(_))
    ));
    assert_eq!(pipeline.directory.code(CODE).unwrap().redeemed_by, None);
}

#[tokio::test]
async fn test_already_active_member_loses_the_race() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::active_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
        },
        |e| e,
    );

    let result = activate_member(&request(), &pipeline.deps).await;

    assert!(matches!(result, Err(ActivationError::AlreadyActive)));
    // The second code is never redeemed against the already-active member
    assert_eq!(pipeline.directory.code(CODE).unwrap().redeemed_by, None);
}

// ============================================================================
// Partial outcomes (commits already happened)
// ============================================================================

#[tokio::test]
async fn test_redemption_failure_is_partial_not_clean() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
                .failing_redemptions("storage unavailable")
        },
        |e| e,
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    let ActivationOutcome::Partial { stage, .. } = outcome else {
        panic!("expected partial outcome");
    };
    assert_eq!(stage, PartialStage::Redemption);

    // Member is active even though redemption failed
    let member = pipeline.directory.member(member_id()).unwrap();
    assert_eq!(member.status, MemberStatus::Active);

    // Walk never started
    assert!(pipeline.engine.batch_calls().is_empty());
}

#[tokio::test]
async fn test_code_held_by_another_member_is_partial() {
    let mut code = fixtures::invitation_code(CODE, owner_id(), Some(2));
    code.redeemed_by = Some(Uuid::from_u128(99));

    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(code)
        },
        |e| e,
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    let ActivationOutcome::Partial { stage, .. } = outcome else {
        panic!("expected partial outcome");
    };
    assert_eq!(stage, PartialStage::Redemption);

    // Still bound to the original member, never double-redeemed
    assert_eq!(
        pipeline.directory.code(CODE).unwrap().redeemed_by,
        Some(Uuid::from_u128(99))
    );
}

#[tokio::test]
async fn test_walk_failure_leaves_activation_and_redemption_standing() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
        },
        |e| e.with_next_generation(4).with_failure("ledger unavailable"),
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    let ActivationOutcome::Partial { stage, detail, .. } = outcome else {
        panic!("expected partial outcome");
    };
    assert_eq!(stage, PartialStage::Incentives);
    assert!(detail.contains("ledger unavailable"));

    // Earlier commits stand: member active, code redeemed
    let member = pipeline.directory.member(member_id()).unwrap();
    assert_eq!(member.status, MemberStatus::Active);
    assert_eq!(
        pipeline.directory.code(CODE).unwrap().redeemed_by,
        Some(member_id())
    );

    // First batch applied, second failed, no third attempt
    assert_eq!(pipeline.engine.batch_calls().len(), 2);
}

#[tokio::test]
async fn test_runaway_cursor_hits_the_batch_cap() {
    let pipeline = TestPipeline::build(
        |d| {
            d.with_member(fixtures::inactive_member(member_id(), admin_id()))
                .with_code(fixtures::invitation_code(CODE, owner_id(), Some(2)))
        },
        |e| {
            // An engine that always signals more generations
            let mut engine = e;
            for batch in 0..1200 {
                engine = engine.with_next_generation(3 * batch + 4);
            }
            engine
        },
    );

    let outcome = activate_member(&request(), &pipeline.deps).await.unwrap();

    let ActivationOutcome::Partial { stage, detail, .. } = outcome else {
        panic!("expected partial outcome");
    };
    assert_eq!(stage, PartialStage::Incentives);
    assert!(detail.contains("1000"));
    assert_eq!(pipeline.engine.batch_calls().len(), 1000);
}

// ============================================================================
// Redemption idempotence
// ============================================================================

#[tokio::test]
async fn test_repeated_redemption_is_a_safe_noop() {
    use referral_core::domains::members::activities::redeem_code;

    let pipeline = TestPipeline::build(
        |d| d.with_code(fixtures::invitation_code(CODE, owner_id(), Some(2))),
        |e| e,
    );

    redeem_code(CODE, member_id(), &pipeline.deps).await.unwrap();
    // Second call with the same pair: safe no-op, state unchanged
    redeem_code(CODE, member_id(), &pipeline.deps).await.unwrap();

    assert_eq!(
        pipeline.directory.code(CODE).unwrap().redeemed_by,
        Some(member_id())
    );
}
