//! Tenantry Core — domain models, store traits, and errors shared
//! across the tenantry crates.

pub mod error;
pub mod models;
pub mod store;

pub use error::{TenantryError, TenantryResult};
