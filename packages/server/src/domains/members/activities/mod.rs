// Member activities - single-purpose async functions over ServerDeps

pub mod activate_profile;
pub mod incentive_walk;
pub mod redeem_code;
pub mod resolve_code;

pub use activate_profile::activate_profile;
pub use incentive_walk::{walk_incentives, GENERATIONS_PER_BATCH, MAX_WALK_BATCHES};
pub use redeem_code::redeem_code;
pub use resolve_code::resolve_invitation_code;
