// Referral Activation Service - API Core
//
// Backend for the retailer referral program: resolves invitation codes,
// activates registered members, redeems codes, and drives the generational
// incentive walk against the external incentive engine.
//
// Architecture follows domain-driven design: domains hold models/activities/
// workflows, kernel holds infrastructure traits and their implementations.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
