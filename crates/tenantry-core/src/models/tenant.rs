//! Tenant domain model.
//!
//! A tenant is a logically isolated customer account. All dependent
//! records (config, quota, isolation) are keyed by the tenant id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::{Plan, QuotaLimit, ResourceKind};

/// Lifecycle state of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Suspended,
    /// Transitional marker only — deletion removes the record entirely,
    /// so a stored tenant never carries this status.
    Deleted,
}

/// Per-tenant settings: branding, resolved feature flags, and quota
/// limit overrides applied on top of the plan table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantSettings {
    /// Arbitrary branding payload (logo URL, colors, ...).
    pub branding: serde_json::Value,
    /// Resolved feature-flag set: plan defaults merged with overrides.
    pub features: BTreeMap<String, bool>,
    /// Per-tenant ceilings that replace the plan default for a resource.
    pub limit_overrides: BTreeMap<ResourceKind, QuotaLimit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Primary domain, unique across active tenants.
    pub domain: String,
    /// Subdomain label, unique across active tenants.
    pub subdomain: String,
    pub plan: Plan,
    pub status: TenantStatus,
    /// Deployment region hint for the infrastructure layer.
    pub region: Option<String>,
    pub settings: TenantSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub domain: String,
    pub subdomain: String,
    /// Defaults to [`Plan::Standard`] when absent.
    pub plan: Option<Plan>,
    pub branding: Option<serde_json::Value>,
    /// Feature-flag overrides merged over the plan defaults.
    pub features: Option<BTreeMap<String, bool>>,
    pub limit_overrides: Option<BTreeMap<ResourceKind, QuotaLimit>>,
    pub region: Option<String>,
}

/// Fields that can be updated on an existing tenant (shallow merge).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTenant {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    /// A plan change recomputes quota limits from the plan table.
    pub plan: Option<Plan>,
    pub status: Option<TenantStatus>,
    pub branding: Option<serde_json::Value>,
    pub features: Option<BTreeMap<String, bool>>,
    pub region: Option<String>,
}

/// Filters for [`crate::store::TenantStore::list`]. All present filters
/// must match (AND semantics).
#[derive(Debug, Clone, Default)]
pub struct TenantFilter {
    pub status: Option<TenantStatus>,
    pub plan: Option<Plan>,
    /// Case-insensitive substring match against `name` or `domain`.
    pub search: Option<String>,
}

impl TenantFilter {
    pub fn matches(&self, tenant: &Tenant) -> bool {
        if let Some(status) = self.status
            && tenant.status != status
        {
            return false;
        }
        if let Some(plan) = self.plan
            && tenant.plan != plan
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = tenant.name.to_lowercase().contains(&needle);
            let in_domain = tenant.domain.to_lowercase().contains(&needle);
            if !in_name && !in_domain {
                return false;
            }
        }
        true
    }
}
