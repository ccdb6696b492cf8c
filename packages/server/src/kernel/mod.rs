// Kernel: infrastructure traits and their implementations

pub mod deps;
pub mod directory;
pub mod incentive_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use directory::PostgresDirectory;
pub use incentive_client::IncentiveClient;
pub use traits::{BaseIncentiveEngine, BaseMemberDirectory};
