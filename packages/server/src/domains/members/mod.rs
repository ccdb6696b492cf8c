//! Members domain - retailer members and their referral activation
//!
//! Responsibilities:
//! - Invitation code resolution and redemption
//! - Member activation with upline/level/role stamping
//! - Generational incentive walk against the external incentive engine

pub mod activities;
pub mod errors;
pub mod models;
pub mod types;
pub mod workflows;

pub use errors::ActivationError;
pub use types::{ActivationOutcome, PartialStage};
