// Shared test support for pipeline integration tests

pub mod fixtures;

use std::sync::Arc;

use referral_core::kernel::test_dependencies::{
    new_call_log, CallLog, MockIncentiveEngine, MockMemberDirectory,
};
use referral_core::kernel::ServerDeps;

/// In-memory stand-in for the backing services, with handles kept so tests
/// can inspect recorded calls and mutated state afterwards.
pub struct TestPipeline {
    pub deps: ServerDeps,
    pub directory: Arc<MockMemberDirectory>,
    pub engine: Arc<MockIncentiveEngine>,
    pub log: CallLog,
}

impl TestPipeline {
    /// Build a pipeline whose mocks share one call log. The closures
    /// configure each mock (seed records, queue outcomes, arm failures).
    pub fn build<D, E>(configure_directory: D, configure_engine: E) -> Self
    where
        D: FnOnce(MockMemberDirectory) -> MockMemberDirectory,
        E: FnOnce(MockIncentiveEngine) -> MockIncentiveEngine,
    {
        let log = new_call_log();
        let directory = Arc::new(configure_directory(MockMemberDirectory::new(log.clone())));
        let engine = Arc::new(configure_engine(MockIncentiveEngine::new(log.clone())));
        let deps = ServerDeps::new(directory.clone(), engine.clone());

        Self {
            deps,
            directory,
            engine,
            log,
        }
    }
}
