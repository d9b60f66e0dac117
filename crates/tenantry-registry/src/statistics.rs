//! Per-tenant usage summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tenantry_core::models::isolation::TenantIsolation;
use tenantry_core::models::plan::{Plan, QuotaLimit, ResourceKind};
use tenantry_core::models::quota::ResourceQuota;
use tenantry_core::models::tenant::{Tenant, TenantStatus};

/// Usage and utilization for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceStat {
    pub usage: u64,
    pub limit: QuotaLimit,
    /// `usage / limit * 100`. Reported as `0.0` for unlimited limits by
    /// definition, not as a computed value.
    pub utilization_pct: f64,
}

/// Aggregated snapshot returned by `tenant_statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantStatistics {
    pub tenant_id: Uuid,
    pub name: String,
    pub domain: String,
    pub plan: Plan,
    pub status: TenantStatus,
    pub resources: BTreeMap<ResourceKind, ResourceStat>,
    pub features: BTreeMap<String, bool>,
    pub isolation: TenantIsolation,
}

impl TenantStatistics {
    pub fn build(tenant: &Tenant, quota: &ResourceQuota, isolation: TenantIsolation) -> Self {
        let resources = quota
            .limits
            .iter()
            .map(|(kind, limit)| {
                let usage = quota.usage(*kind);
                let utilization_pct = match limit {
                    QuotaLimit::Unlimited => 0.0,
                    QuotaLimit::Limited(0) => 0.0,
                    QuotaLimit::Limited(l) => usage as f64 / *l as f64 * 100.0,
                };
                (
                    *kind,
                    ResourceStat {
                        usage,
                        limit: *limit,
                        utilization_pct,
                    },
                )
            })
            .collect();

        Self {
            tenant_id: tenant.id,
            name: tenant.name.clone(),
            domain: tenant.domain.clone(),
            plan: tenant.plan,
            status: tenant.status,
            resources,
            features: tenant.settings.features.clone(),
            isolation,
        }
    }
}
