//! In-memory store: `HashMap`s behind a single `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::config::TenantConfig;
use tenantry_core::models::isolation::TenantIsolation;
use tenantry_core::models::plan::ResourceKind;
use tenantry_core::models::quota::{QuotaCheck, ResourceQuota};
use tenantry_core::models::tenant::{Tenant, TenantFilter, TenantStatus};
use tenantry_core::store::{ConfigStore, IsolationStore, QuotaStore, TenantStore};

#[derive(Default)]
struct State {
    tenants: HashMap<Uuid, Tenant>,
    configs: HashMap<Uuid, TenantConfig>,
    quotas: HashMap<Uuid, ResourceQuota>,
    isolation: HashMap<Uuid, TenantIsolation>,
}

/// In-memory store backend. `Clone` is cheap and shares state, so one
/// instance can serve all four trait bounds of the registry.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TenantStore for MemoryStore {
    async fn insert(&self, tenant: Tenant) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        debug!(tenant_id = %tenant.id, domain = %tenant.domain, "storing tenant");
        state.tenants.insert(tenant.id, tenant);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> TenantryResult<Tenant> {
        let state = self.state.read().await;
        state
            .tenants
            .get(&id)
            .cloned()
            .ok_or(TenantryError::TenantNotFound { id })
    }

    async fn get_by_domain(&self, domain_or_subdomain: &str) -> TenantryResult<Tenant> {
        let matches = self.find_by_domain(domain_or_subdomain).await?;
        // Active holder wins; `find_by_domain` orders by creation time,
        // so ties resolve deterministically.
        matches
            .iter()
            .find(|t| t.status == TenantStatus::Active)
            .or_else(|| matches.first())
            .cloned()
            .ok_or_else(|| TenantryError::DomainNotFound {
                domain: domain_or_subdomain.to_string(),
            })
    }

    async fn find_by_domain(&self, domain_or_subdomain: &str) -> TenantryResult<Vec<Tenant>> {
        let state = self.state.read().await;
        // Linear scan; indexing is a persistent backend's concern.
        let mut matches: Vec<Tenant> = state
            .tenants
            .values()
            .filter(|t| t.domain == domain_or_subdomain || t.subdomain == domain_or_subdomain)
            .cloned()
            .collect();
        matches.sort_by_key(|t| t.created_at);
        Ok(matches)
    }

    async fn put(&self, tenant: Tenant) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        match state.tenants.get_mut(&tenant.id) {
            Some(slot) => {
                *slot = tenant;
                Ok(())
            }
            None => Err(TenantryError::TenantNotFound { id: tenant.id }),
        }
    }

    async fn remove(&self, id: Uuid) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state
            .tenants
            .remove(&id)
            .map(|_| ())
            .ok_or(TenantryError::TenantNotFound { id })
    }

    async fn list(&self, filter: TenantFilter) -> TenantryResult<Vec<Tenant>> {
        let state = self.state.read().await;
        let mut tenants: Vec<Tenant> = state
            .tenants
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tenants.sort_by_key(|t| t.created_at);
        Ok(tenants)
    }
}

impl ConfigStore for MemoryStore {
    async fn insert(&self, config: TenantConfig) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state.configs.insert(config.tenant_id, config);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid) -> TenantryResult<TenantConfig> {
        let state = self.state.read().await;
        state
            .configs
            .get(&tenant_id)
            .cloned()
            .ok_or(TenantryError::TenantNotFound { id: tenant_id })
    }

    async fn remove(&self, tenant_id: Uuid) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state
            .configs
            .remove(&tenant_id)
            .map(|_| ())
            .ok_or(TenantryError::TenantNotFound { id: tenant_id })
    }
}

impl QuotaStore for MemoryStore {
    async fn insert(&self, quota: ResourceQuota) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state.quotas.insert(quota.tenant_id, quota);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid) -> TenantryResult<ResourceQuota> {
        let state = self.state.read().await;
        state
            .quotas
            .get(&tenant_id)
            .cloned()
            .ok_or(TenantryError::QuotaNotFound { id: tenant_id })
    }

    async fn put(&self, quota: ResourceQuota) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        match state.quotas.get_mut(&quota.tenant_id) {
            Some(slot) => {
                *slot = quota;
                Ok(())
            }
            None => Err(TenantryError::QuotaNotFound {
                id: quota.tenant_id,
            }),
        }
    }

    async fn remove(&self, tenant_id: Uuid) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state
            .quotas
            .remove(&tenant_id)
            .map(|_| ())
            .ok_or(TenantryError::QuotaNotFound { id: tenant_id })
    }

    async fn update_usage(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        delta: i64,
    ) -> TenantryResult<u64> {
        let mut state = self.state.write().await;
        let quota = state
            .quotas
            .get_mut(&tenant_id)
            .ok_or(TenantryError::QuotaNotFound { id: tenant_id })?;
        Ok(quota.apply_usage_delta(kind, delta))
    }

    async fn reserve(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        amount: u64,
    ) -> TenantryResult<QuotaCheck> {
        // Check and commit under one write lock, so two racing callers
        // cannot both pass against the same headroom.
        let mut state = self.state.write().await;
        let quota = state
            .quotas
            .get_mut(&tenant_id)
            .ok_or(TenantryError::QuotaNotFound { id: tenant_id })?;
        let check = quota.check(kind, amount);
        if check.allowed {
            quota.apply_usage_delta(kind, i64::try_from(amount).unwrap_or(i64::MAX));
        }
        Ok(check)
    }
}

impl IsolationStore for MemoryStore {
    async fn insert(&self, isolation: TenantIsolation) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state.isolation.insert(isolation.tenant_id, isolation);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid) -> TenantryResult<TenantIsolation> {
        let state = self.state.read().await;
        state
            .isolation
            .get(&tenant_id)
            .cloned()
            .ok_or(TenantryError::TenantNotFound { id: tenant_id })
    }

    async fn remove(&self, tenant_id: Uuid) -> TenantryResult<()> {
        let mut state = self.state.write().await;
        state
            .isolation
            .remove(&tenant_id)
            .map(|_| ())
            .ok_or(TenantryError::TenantNotFound { id: tenant_id })
    }
}
