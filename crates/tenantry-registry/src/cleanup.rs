//! Resource cleanup hooks invoked during tenant deletion.
//!
//! The registry only orchestrates teardown; the actual infrastructure
//! calls live behind [`ResourceCleanup`]. Deletion is saga-style: every
//! domain is attempted, failures are collected, and the outcome names
//! what still needs manual teardown instead of silently leaving
//! orphans.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tenantry_core::models::isolation::TenantIsolation;

/// One isolated resource domain torn down at deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupDomain {
    Database,
    Storage,
    Cache,
    Queue,
}

impl CleanupDomain {
    pub const ALL: [CleanupDomain; 4] = [
        CleanupDomain::Database,
        CleanupDomain::Storage,
        CleanupDomain::Cache,
        CleanupDomain::Queue,
    ];
}

impl fmt::Display for CleanupDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CleanupDomain::Database => "database",
            CleanupDomain::Storage => "storage",
            CleanupDomain::Cache => "cache",
            CleanupDomain::Queue => "queue",
        };
        f.write_str(s)
    }
}

/// Failure reported by a cleanup hook. Transient-failure retry policy
/// belongs to the infrastructure side, not the registry.
#[derive(Debug, Error)]
#[error("cleanup of {domain} failed: {message}")]
pub struct CleanupError {
    pub domain: CleanupDomain,
    pub message: String,
}

/// Per-domain teardown of a tenant's isolated resources.
pub trait ResourceCleanup: Send + Sync {
    fn teardown(
        &self,
        domain: CleanupDomain,
        isolation: &TenantIsolation,
    ) -> impl Future<Output = Result<(), CleanupError>> + Send;
}

/// Default stub: every teardown succeeds without doing anything. A
/// production deployment wires this to the real database, storage,
/// cache, and queue services.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCleanup;

impl ResourceCleanup for NoopCleanup {
    async fn teardown(
        &self,
        _domain: CleanupDomain,
        _isolation: &TenantIsolation,
    ) -> Result<(), CleanupError> {
        Ok(())
    }
}

/// Result of `delete_tenant`. Registry records are always removed; the
/// variant reports whether external teardown fully succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    FullyDeleted,
    /// External resources in these domains still exist and need manual
    /// teardown.
    PartiallyDeleted { remaining: Vec<CleanupDomain> },
}
