//! Store trait definitions for data access abstraction.
//!
//! All store operations are async so that a persistent transactional
//! backend can implement the same traits; the registry itself never
//! needs to suspend. Mutating lookups on absent ids fail — there is no
//! silent no-op path.

use uuid::Uuid;

use crate::error::TenantryResult;
use crate::models::config::TenantConfig;
use crate::models::isolation::TenantIsolation;
use crate::models::plan::ResourceKind;
use crate::models::quota::{QuotaCheck, ResourceQuota};
use crate::models::tenant::{Tenant, TenantFilter};

pub trait TenantStore: Send + Sync {
    fn insert(&self, tenant: Tenant) -> impl Future<Output = TenantryResult<()>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = TenantryResult<Tenant>> + Send;
    /// Lookup matching either the `domain` or the `subdomain` field.
    /// An active holder wins over suspended ones, oldest record first,
    /// so resolution stays deterministic when a suspended tenant still
    /// carries the same domain.
    fn get_by_domain(
        &self,
        domain_or_subdomain: &str,
    ) -> impl Future<Output = TenantryResult<Tenant>> + Send;
    /// Every tenant whose `domain` or `subdomain` equals the candidate,
    /// regardless of status. Uniqueness preconditions must inspect all
    /// holders, not just the resolved one.
    fn find_by_domain(
        &self,
        domain_or_subdomain: &str,
    ) -> impl Future<Output = TenantryResult<Vec<Tenant>>> + Send;
    /// Replace an existing record; fails with `TenantNotFound` if absent.
    fn put(&self, tenant: Tenant) -> impl Future<Output = TenantryResult<()>> + Send;
    fn remove(&self, id: Uuid) -> impl Future<Output = TenantryResult<()>> + Send;
    /// Materialized snapshot of all tenants matching `filter`.
    fn list(
        &self,
        filter: TenantFilter,
    ) -> impl Future<Output = TenantryResult<Vec<Tenant>>> + Send;
}

pub trait ConfigStore: Send + Sync {
    fn insert(&self, config: TenantConfig) -> impl Future<Output = TenantryResult<()>> + Send;
    fn get(&self, tenant_id: Uuid) -> impl Future<Output = TenantryResult<TenantConfig>> + Send;
    fn remove(&self, tenant_id: Uuid) -> impl Future<Output = TenantryResult<()>> + Send;
}

pub trait QuotaStore: Send + Sync {
    fn insert(&self, quota: ResourceQuota) -> impl Future<Output = TenantryResult<()>> + Send;
    fn get(&self, tenant_id: Uuid) -> impl Future<Output = TenantryResult<ResourceQuota>> + Send;
    /// Replace an existing record; fails with `QuotaNotFound` if absent.
    fn put(&self, quota: ResourceQuota) -> impl Future<Output = TenantryResult<()>> + Send;
    fn remove(&self, tenant_id: Uuid) -> impl Future<Output = TenantryResult<()>> + Send;

    /// Add `delta` to the usage counter for `kind` and return the new
    /// value. Does not clamp to the limit; negative deltas saturate
    /// at zero.
    fn update_usage(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        delta: i64,
    ) -> impl Future<Output = TenantryResult<u64>> + Send;

    /// Atomic reserve-or-reject: check `amount` against headroom and
    /// commit the increment in one critical section. On denial nothing
    /// is committed. This is the race-free alternative to calling
    /// `check` and `update_usage` separately.
    fn reserve(
        &self,
        tenant_id: Uuid,
        kind: ResourceKind,
        amount: u64,
    ) -> impl Future<Output = TenantryResult<QuotaCheck>> + Send;
}

pub trait IsolationStore: Send + Sync {
    fn insert(&self, isolation: TenantIsolation)
    -> impl Future<Output = TenantryResult<()>> + Send;
    fn get(
        &self,
        tenant_id: Uuid,
    ) -> impl Future<Output = TenantryResult<TenantIsolation>> + Send;
    fn remove(&self, tenant_id: Uuid) -> impl Future<Output = TenantryResult<()>> + Send;
}
