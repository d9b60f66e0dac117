//! Tenantry Registry — tenant lifecycle, resource quotas, and
//! isolation descriptors over pluggable stores.

pub mod access;
pub mod cleanup;
pub mod config;
pub mod credentials;
pub mod service;
pub mod statistics;

pub use access::{AccessDecision, DenialReason};
pub use cleanup::{CleanupDomain, CleanupError, DeleteOutcome, NoopCleanup, ResourceCleanup};
pub use config::RegistryConfig;
pub use service::{CreatedTenant, TenantRegistry};
pub use statistics::{ResourceStat, TenantStatistics};
