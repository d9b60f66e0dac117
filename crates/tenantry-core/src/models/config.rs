//! Tenant provisioning config.
//!
//! Built wholesale at tenant creation and never incrementally patched;
//! a plan change does not touch it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical database connection parameters handed to the infrastructure
/// layer. The credential is stored only in hashed (Argon2id PHC) form;
/// the raw secret is surfaced exactly once, at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseParams {
    pub host: String,
    /// Per-tenant logical database name.
    pub name: String,
    pub credential_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub tenant_id: Uuid,
    pub database: DatabaseParams,
    /// Object-storage bucket for this tenant.
    pub storage_bucket: String,
    /// Key prefix for the shared cache.
    pub cache_namespace: String,
    /// Message-queue name for this tenant's jobs.
    pub queue_name: String,
    /// Resolved feature-flag set, snapshotted from the tenant settings.
    pub features: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
}
