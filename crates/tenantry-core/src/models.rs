//! Domain models for tenantry.
//!
//! These are the core types shared across all crates. Each tenant owns
//! exactly one config, one quota, and one isolation record, all keyed
//! by tenant id.

pub mod config;
pub mod isolation;
pub mod plan;
pub mod quota;
pub mod tenant;
