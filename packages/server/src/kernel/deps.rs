//! Server dependencies for domain activities (using traits for testability)
//!
//! Central dependency container handed to activities and workflows. Both
//! seams of the activation pipeline are trait objects so the whole pipeline
//! runs against in-memory mocks in tests.

use std::sync::Arc;

use crate::kernel::{BaseIncentiveEngine, BaseMemberDirectory};

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Member and invitation-code records (the backing directory)
    pub directory: Arc<dyn BaseMemberDirectory>,
    /// External referral-incentive engine
    pub incentives: Arc<dyn BaseIncentiveEngine>,
}

impl ServerDeps {
    pub fn new(
        directory: Arc<dyn BaseMemberDirectory>,
        incentives: Arc<dyn BaseIncentiveEngine>,
    ) -> Self {
        Self {
            directory,
            incentives,
        }
    }
}
