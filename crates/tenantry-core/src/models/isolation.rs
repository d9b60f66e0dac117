//! Tenant isolation descriptors.
//!
//! Purely descriptive metadata: the flags and namespace strings declare
//! how a tenant's workload is to be partitioned, and an external
//! infrastructure layer is expected to read and enforce them. No
//! runtime enforcement happens in this core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical namespace identifiers, derived deterministically from the
/// tenant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolationNamespaces {
    /// Logical database name.
    pub database: String,
    /// Object-storage bucket.
    pub storage: String,
    /// Cache key prefix.
    pub cache: String,
    /// Message-queue name.
    pub queue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantIsolation {
    pub tenant_id: Uuid,
    pub database: bool,
    pub storage: bool,
    pub cache: bool,
    pub network: bool,
    pub security: bool,
    pub namespaces: IsolationNamespaces,
}

impl TenantIsolation {
    /// All isolation flags enabled, the default for new tenants.
    pub fn full(tenant_id: Uuid, namespaces: IsolationNamespaces) -> Self {
        Self {
            tenant_id,
            database: true,
            storage: true,
            cache: true,
            network: true,
            security: true,
            namespaces,
        }
    }
}
