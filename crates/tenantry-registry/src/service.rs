//! Tenant registry service — lifecycle, quota enforcement, and
//! isolation orchestration.

use std::collections::BTreeMap;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::config::{DatabaseParams, TenantConfig};
use tenantry_core::models::isolation::{IsolationNamespaces, TenantIsolation};
use tenantry_core::models::plan::{Plan, QuotaLimit, ResourceKind, plan_features, plan_limits};
use tenantry_core::models::quota::{QuotaCheck, ResourceQuota};
use tenantry_core::models::tenant::{
    CreateTenant, Tenant, TenantFilter, TenantSettings, TenantStatus, UpdateTenant,
};
use tenantry_core::store::{ConfigStore, IsolationStore, QuotaStore, TenantStore};

use crate::access::{AccessDecision, DenialReason};
use crate::cleanup::{CleanupDomain, DeleteOutcome, ResourceCleanup};
use crate::config::RegistryConfig;
use crate::credentials;
use crate::statistics::TenantStatistics;

/// Result of a successful create: the stored tenant plus the raw
/// database credential, surfaced exactly once.
#[derive(Debug)]
pub struct CreatedTenant {
    pub tenant: Tenant,
    pub raw_credential: String,
}

/// The tenant registry.
///
/// Generic over store implementations so the service has no dependency
/// on any particular backend; tests and the single-instance deployment
/// use the in-memory store, production substitutes a transactional one.
pub struct TenantRegistry<T, C, Q, I, H> {
    tenant_store: T,
    config_store: C,
    quota_store: Q,
    isolation_store: I,
    cleanup: H,
    config: RegistryConfig,
}

impl<T, C, Q, I, H> TenantRegistry<T, C, Q, I, H>
where
    T: TenantStore,
    C: ConfigStore,
    Q: QuotaStore,
    I: IsolationStore,
    H: ResourceCleanup,
{
    pub fn new(
        tenant_store: T,
        config_store: C,
        quota_store: Q,
        isolation_store: I,
        cleanup: H,
        config: RegistryConfig,
    ) -> Self {
        Self {
            tenant_store,
            config_store,
            quota_store,
            isolation_store,
            cleanup,
            config,
        }
    }

    /// Create a tenant and all three dependent records.
    ///
    /// Fails with `DuplicateDomain` if the domain or subdomain is
    /// already held by an active tenant, and with `Validation` if a
    /// required field is empty.
    pub async fn create_tenant(&self, input: CreateTenant) -> TenantryResult<CreatedTenant> {
        for (field, value) in [
            ("name", &input.name),
            ("domain", &input.domain),
            ("subdomain", &input.subdomain),
        ] {
            if value.trim().is_empty() {
                return Err(TenantryError::Validation {
                    message: format!("{field} must not be empty"),
                });
            }
        }

        self.ensure_domain_free(&input.domain, None).await?;
        self.ensure_domain_free(&input.subdomain, None).await?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let plan = input.plan.unwrap_or(self.config.default_plan);

        // Plan defaults first, per-tenant overrides on top.
        let mut features: BTreeMap<String, bool> = plan_features(plan)
            .into_iter()
            .map(|(name, enabled)| (name.to_string(), enabled))
            .collect();
        if let Some(overrides) = input.features {
            features.extend(overrides);
        }

        let settings = TenantSettings {
            branding: input
                .branding
                .unwrap_or(serde_json::Value::Object(Default::default())),
            features: features.clone(),
            limit_overrides: input.limit_overrides.unwrap_or_default(),
        };

        let tenant = Tenant {
            id,
            name: input.name,
            domain: input.domain,
            subdomain: input.subdomain,
            plan,
            status: TenantStatus::Active,
            region: input.region,
            settings,
            created_at: now,
            updated_at: now,
        };

        self.tenant_store.insert(tenant.clone()).await?;

        let namespaces = derive_namespaces(id);

        let raw_credential = credentials::generate_credential();
        let credential_hash =
            credentials::hash_credential(&raw_credential, self.config.pepper.as_deref())?;
        self.config_store
            .insert(TenantConfig {
                tenant_id: id,
                database: DatabaseParams {
                    host: self.config.database_host.clone(),
                    name: namespaces.database.clone(),
                    credential_hash,
                },
                storage_bucket: namespaces.storage.clone(),
                cache_namespace: namespaces.cache.clone(),
                queue_name: namespaces.queue.clone(),
                features,
                created_at: now,
            })
            .await?;

        self.quota_store
            .insert(ResourceQuota::new(
                id,
                effective_limits(plan, &tenant.settings.limit_overrides),
            ))
            .await?;

        self.isolation_store
            .insert(TenantIsolation::full(id, namespaces))
            .await?;

        info!(tenant_id = %id, domain = %tenant.domain, plan = %plan, "tenant created");

        Ok(CreatedTenant {
            tenant,
            raw_credential,
        })
    }

    pub async fn get_tenant(&self, id: Uuid) -> TenantryResult<Tenant> {
        self.tenant_store.get(id).await
    }

    /// Lookup by either domain or subdomain.
    pub async fn get_tenant_by_domain(&self, domain_or_subdomain: &str) -> TenantryResult<Tenant> {
        self.tenant_store.get_by_domain(domain_or_subdomain).await
    }

    pub async fn get_tenant_config(&self, id: Uuid) -> TenantryResult<TenantConfig> {
        self.config_store.get(id).await
    }

    pub async fn get_tenant_isolation(&self, id: Uuid) -> TenantryResult<TenantIsolation> {
        self.isolation_store.get(id).await
    }

    /// Shallow-merge `updates` onto the tenant. A plan change
    /// recomputes the quota limits from the plan table; usage counters
    /// are preserved.
    pub async fn update_tenant(&self, id: Uuid, updates: UpdateTenant) -> TenantryResult<Tenant> {
        let mut tenant = self.tenant_store.get(id).await?;

        if let Some(domain) = &updates.domain
            && *domain != tenant.domain
        {
            self.ensure_domain_free(domain, Some(id)).await?;
        }
        if let Some(subdomain) = &updates.subdomain
            && *subdomain != tenant.subdomain
        {
            self.ensure_domain_free(subdomain, Some(id)).await?;
        }

        let plan_change = match updates.plan {
            Some(new_plan) if new_plan != tenant.plan => Some(new_plan),
            _ => None,
        };

        if let Some(name) = updates.name {
            tenant.name = name;
        }
        if let Some(domain) = updates.domain {
            tenant.domain = domain;
        }
        if let Some(subdomain) = updates.subdomain {
            tenant.subdomain = subdomain;
        }
        if let Some(plan) = updates.plan {
            tenant.plan = plan;
        }
        if let Some(status) = updates.status {
            tenant.status = status;
        }
        if let Some(branding) = updates.branding {
            tenant.settings.branding = branding;
        }
        if let Some(features) = updates.features {
            tenant.settings.features.extend(features);
        }
        if let Some(region) = updates.region {
            tenant.region = Some(region);
        }
        tenant.updated_at = Utc::now();

        self.tenant_store.put(tenant.clone()).await?;

        if let Some(new_plan) = plan_change {
            let mut quota = self.quota_store.get(id).await?;
            quota.limits = effective_limits(new_plan, &tenant.settings.limit_overrides)
                .into_iter()
                .collect();
            quota.updated_at = Utc::now();
            self.quota_store.put(quota).await?;
            info!(tenant_id = %id, plan = %new_plan, "quota limits recomputed for plan change");
        }

        Ok(tenant)
    }

    /// Hard-delete a tenant: run cleanup hooks for every resource
    /// domain, then remove all four records. Hook failures do not abort
    /// the delete; they are reported in the outcome so nothing is
    /// silently orphaned.
    pub async fn delete_tenant(&self, id: Uuid) -> TenantryResult<DeleteOutcome> {
        self.tenant_store.get(id).await?;

        // Fall back to freshly derived namespaces if the isolation
        // record is missing, so teardown still targets the right names.
        let isolation = match self.isolation_store.get(id).await {
            Ok(isolation) => isolation,
            Err(_) => TenantIsolation::full(id, derive_namespaces(id)),
        };

        let mut remaining = Vec::new();
        for domain in CleanupDomain::ALL {
            if let Err(err) = self.cleanup.teardown(domain, &isolation).await {
                warn!(tenant_id = %id, %domain, error = %err, "resource cleanup failed");
                remaining.push(domain);
            }
        }

        self.tenant_store.remove(id).await?;
        // Dependent records may already be gone if a previous delete
        // was interrupted; that is not an error for the cascade.
        for result in [
            self.config_store.remove(id).await,
            self.quota_store.remove(id).await,
            self.isolation_store.remove(id).await,
        ] {
            if let Err(err) = result {
                warn!(tenant_id = %id, error = %err, "dependent record already absent");
            }
        }

        info!(tenant_id = %id, failed_cleanups = remaining.len(), "tenant deleted");

        if remaining.is_empty() {
            Ok(DeleteOutcome::FullyDeleted)
        } else {
            Ok(DeleteOutcome::PartiallyDeleted { remaining })
        }
    }

    /// Advisory quota check: reads headroom without reserving it. Two
    /// racing callers can both pass against the same headroom; use
    /// [`TenantRegistry::reserve_resource`] when that matters.
    pub async fn check_resource_quota(
        &self,
        id: Uuid,
        kind: ResourceKind,
        amount: u64,
    ) -> TenantryResult<QuotaCheck> {
        let quota = self.quota_store.get(id).await?;
        Ok(quota.check(kind, amount))
    }

    /// Apply a signed usage delta and return the new counter. No
    /// clamping to the limit happens here — callers are expected to
    /// gate commits with a check or use `reserve_resource`.
    pub async fn update_resource_usage(
        &self,
        id: Uuid,
        kind: ResourceKind,
        delta: i64,
    ) -> TenantryResult<u64> {
        self.quota_store.update_usage(id, kind, delta).await
    }

    /// Atomic reserve-or-reject: check and commit under one critical
    /// section in the store.
    pub async fn reserve_resource(
        &self,
        id: Uuid,
        kind: ResourceKind,
        amount: u64,
    ) -> TenantryResult<QuotaCheck> {
        self.quota_store.reserve(id, kind, amount).await
    }

    /// Composite access check. `user_id` is accepted for interface
    /// compatibility; per-user authorization is owned by an external
    /// access-control layer.
    pub async fn validate_tenant_access(
        &self,
        id: Uuid,
        _user_id: Uuid,
        kind: ResourceKind,
    ) -> TenantryResult<AccessDecision> {
        let tenant = match self.tenant_store.get(id).await {
            Ok(tenant) => tenant,
            Err(TenantryError::TenantNotFound { .. }) => {
                return Ok(AccessDecision::deny(DenialReason::TenantNotFound));
            }
            Err(err) => return Err(err),
        };

        if tenant.status != TenantStatus::Active {
            return Ok(AccessDecision::deny(DenialReason::TenantNotActive));
        }

        let check = self.check_resource_quota(id, kind, 1).await?;
        if check.allowed {
            Ok(AccessDecision::allow())
        } else {
            Ok(AccessDecision::deny(DenialReason::QuotaExceeded))
        }
    }

    pub async fn list_tenants(&self, filter: TenantFilter) -> TenantryResult<Vec<Tenant>> {
        self.tenant_store.list(filter).await
    }

    pub async fn tenant_statistics(&self, id: Uuid) -> TenantryResult<TenantStatistics> {
        let tenant = self.tenant_store.get(id).await?;
        let quota = self.quota_store.get(id).await?;
        let isolation = self.isolation_store.get(id).await?;
        Ok(TenantStatistics::build(&tenant, &quota, isolation))
    }

    /// Uniqueness precondition: neither domain nor subdomain of any
    /// active tenant (other than `exclude`) may equal `candidate`.
    /// Inspects every holder of the candidate — a suspended tenant
    /// sharing the domain must not shadow an active one.
    async fn ensure_domain_free(
        &self,
        candidate: &str,
        exclude: Option<Uuid>,
    ) -> TenantryResult<()> {
        let holders = self.tenant_store.find_by_domain(candidate).await?;
        let active_conflict = holders
            .iter()
            .any(|t| t.status == TenantStatus::Active && Some(t.id) != exclude);
        if active_conflict {
            Err(TenantryError::DuplicateDomain {
                domain: candidate.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Plan-table limits with per-tenant overrides applied on top.
fn effective_limits(
    plan: Plan,
    overrides: &BTreeMap<ResourceKind, QuotaLimit>,
) -> Vec<(ResourceKind, QuotaLimit)> {
    plan_limits(plan)
        .into_iter()
        .map(|(kind, limit)| (kind, overrides.get(&kind).copied().unwrap_or(limit)))
        .collect()
}

/// Derive the logical namespace identifiers for a tenant id. The cache
/// prefix uses a short digest to keep keys compact.
fn derive_namespaces(id: Uuid) -> IsolationNamespaces {
    let simple = id.simple().to_string();
    let digest = Sha256::digest(id.as_bytes());
    IsolationNamespaces {
        database: format!("tenant_{simple}"),
        storage: format!("tenant-{id}-storage"),
        cache: format!("tenant:{}", &hex::encode(digest)[..12]),
        queue: format!("tenant-{id}-jobs"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_are_deterministic_and_distinct() {
        let id = Uuid::new_v4();
        let a = derive_namespaces(id);
        let b = derive_namespaces(id);
        assert_eq!(a, b);

        let other = derive_namespaces(Uuid::new_v4());
        assert_ne!(a.database, other.database);
        assert_ne!(a.cache, other.cache);
    }

    #[test]
    fn overrides_replace_plan_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert(ResourceKind::Users, QuotaLimit::Limited(5));
        let limits = effective_limits(Plan::Basic, &overrides);
        let users = limits
            .iter()
            .find(|(kind, _)| *kind == ResourceKind::Users)
            .unwrap();
        assert_eq!(users.1, QuotaLimit::Limited(5));
        let cpu = limits
            .iter()
            .find(|(kind, _)| *kind == ResourceKind::Cpu)
            .unwrap();
        assert_eq!(cpu.1, QuotaLimit::Limited(2));
    }
}
