//! Integration tests for the in-memory store implementation.

use chrono::Utc;
use uuid::Uuid;

use tenantry_core::error::TenantryError;
use tenantry_core::models::isolation::{IsolationNamespaces, TenantIsolation};
use tenantry_core::models::plan::{Plan, QuotaLimit, ResourceKind, plan_limits};
use tenantry_core::models::quota::ResourceQuota;
use tenantry_core::models::tenant::{Tenant, TenantFilter, TenantSettings, TenantStatus};
use tenantry_core::store::{IsolationStore, QuotaStore, TenantStore};
use tenantry_store::MemoryStore;

/// Helper: build a minimal tenant record.
fn tenant(name: &str, domain: &str, subdomain: &str, plan: Plan) -> Tenant {
    let now = Utc::now();
    Tenant {
        id: Uuid::new_v4(),
        name: name.into(),
        domain: domain.into(),
        subdomain: subdomain.into(),
        plan,
        status: TenantStatus::Active,
        region: None,
        settings: TenantSettings::default(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn insert_and_get_tenant() {
    let store = MemoryStore::new();
    let t = tenant("Acme Corp", "acme.example.com", "acme", Plan::Standard);

    TenantStore::insert(&store, t.clone()).await.unwrap();
    let fetched = TenantStore::get(&store, t.id).await.unwrap();
    assert_eq!(fetched.id, t.id);
    assert_eq!(fetched.name, "Acme Corp");
}

#[tokio::test]
async fn get_missing_tenant_fails() {
    let store = MemoryStore::new();
    let err = TenantStore::get(&store, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TenantryError::TenantNotFound { .. }));
}

#[tokio::test]
async fn domain_and_subdomain_lookup_are_equivalent() {
    let store = MemoryStore::new();
    let t = tenant("Acme Corp", "acme.example.com", "acme", Plan::Standard);
    TenantStore::insert(&store, t.clone()).await.unwrap();

    let by_domain = store.get_by_domain("acme.example.com").await.unwrap();
    let by_subdomain = store.get_by_domain("acme").await.unwrap();
    assert_eq!(by_domain.id, t.id);
    assert_eq!(by_subdomain.id, t.id);

    // A miss names the domain that failed to resolve.
    let err = store.get_by_domain("nonexistent").await.unwrap_err();
    assert!(matches!(
        err,
        TenantryError::DomainNotFound { domain } if domain == "nonexistent"
    ));
}

#[tokio::test]
async fn domain_resolution_prefers_active_holder() {
    let store = MemoryStore::new();
    let mut suspended = tenant("Old", "shared.example.com", "old", Plan::Basic);
    suspended.status = TenantStatus::Suspended;
    let active = tenant("New", "shared.example.com", "new", Plan::Basic);
    TenantStore::insert(&store, suspended.clone()).await.unwrap();
    TenantStore::insert(&store, active.clone()).await.unwrap();

    // Both holders are visible to uniqueness checks...
    let holders = store.find_by_domain("shared.example.com").await.unwrap();
    assert_eq!(holders.len(), 2);

    // ...but resolution picks the active one, whatever the map order.
    let resolved = store.get_by_domain("shared.example.com").await.unwrap();
    assert_eq!(resolved.id, active.id);
}

#[tokio::test]
async fn put_requires_existing_record() {
    let store = MemoryStore::new();
    let t = tenant("Ghost", "ghost.example.com", "ghost", Plan::Basic);
    let err = TenantStore::put(&store, t.clone()).await.unwrap_err();
    assert!(matches!(err, TenantryError::TenantNotFound { .. }));

    TenantStore::insert(&store, t.clone()).await.unwrap();
    let mut renamed = t.clone();
    renamed.name = "Ghost Inc".into();
    TenantStore::put(&store, renamed).await.unwrap();
    let fetched = TenantStore::get(&store, t.id).await.unwrap();
    assert_eq!(fetched.name, "Ghost Inc");
}

#[tokio::test]
async fn list_filters_compose_with_and_semantics() {
    let store = MemoryStore::new();
    let mut suspended = tenant("Basic Co", "basic.example.com", "basic", Plan::Basic);
    suspended.status = TenantStatus::Suspended;
    let premium_a = tenant("Acme Corp", "acme.example.com", "acme", Plan::Premium);
    let premium_b = tenant("Other", "other.example.com", "other", Plan::Premium);
    for t in [&suspended, &premium_a, &premium_b] {
        TenantStore::insert(&store, t.clone()).await.unwrap();
    }

    let active_premium = store
        .list(TenantFilter {
            status: Some(TenantStatus::Active),
            plan: Some(Plan::Premium),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(active_premium.len(), 2);

    // Search is case-insensitive on name or domain.
    let hits = store
        .list(TenantFilter {
            search: Some("ACME".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, premium_a.id);
}

#[tokio::test]
async fn usage_update_and_reserve() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    QuotaStore::insert(&store, ResourceQuota::new(id, plan_limits(Plan::Basic)))
        .await
        .unwrap();

    // Unguarded updates are unclamped.
    let usage = store
        .update_usage(id, ResourceKind::Users, 45)
        .await
        .unwrap();
    assert_eq!(usage, 45);

    // Reservation commits only when headroom suffices.
    let granted = store.reserve(id, ResourceKind::Users, 5).await.unwrap();
    assert!(granted.allowed);
    assert_eq!(
        QuotaStore::get(&store, id)
            .await
            .unwrap()
            .usage(ResourceKind::Users),
        50
    );

    let denied = store.reserve(id, ResourceKind::Users, 1).await.unwrap();
    assert!(!denied.allowed);
    assert_eq!(denied.remaining, QuotaLimit::Limited(0));
    // Denied reservation committed nothing.
    assert_eq!(
        QuotaStore::get(&store, id)
            .await
            .unwrap()
            .usage(ResourceKind::Users),
        50
    );
}

#[tokio::test]
async fn concurrent_reservations_never_overshoot() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    QuotaStore::insert(&store, ResourceQuota::new(id, plan_limits(Plan::Basic)))
        .await
        .unwrap();

    // 100 tasks each try to reserve 1 of 50 seats.
    let mut handles = Vec::new();
    for _ in 0..100 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.reserve(id, ResourceKind::Users, 1).await.unwrap()
        }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap().allowed {
            granted += 1;
        }
    }
    assert_eq!(granted, 50);
    assert_eq!(
        QuotaStore::get(&store, id)
            .await
            .unwrap()
            .usage(ResourceKind::Users),
        50
    );
}

#[tokio::test]
async fn quota_operations_on_missing_tenant_fail() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();

    let err = store
        .update_usage(id, ResourceKind::Cpu, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::QuotaNotFound { .. }));

    let err = store.reserve(id, ResourceKind::Cpu, 1).await.unwrap_err();
    assert!(matches!(err, TenantryError::QuotaNotFound { .. }));
}

#[tokio::test]
async fn isolation_round_trip_and_remove() {
    let store = MemoryStore::new();
    let id = Uuid::new_v4();
    let isolation = TenantIsolation::full(
        id,
        IsolationNamespaces {
            database: format!("tenant_{}", id.simple()),
            storage: format!("tenant-{id}-storage"),
            cache: "tenant:abc123".into(),
            queue: format!("tenant-{id}-jobs"),
        },
    );

    IsolationStore::insert(&store, isolation.clone()).await.unwrap();
    let fetched = IsolationStore::get(&store, id).await.unwrap();
    assert!(fetched.database && fetched.security);
    assert_eq!(fetched.namespaces, isolation.namespaces);

    IsolationStore::remove(&store, id).await.unwrap();
    assert!(IsolationStore::get(&store, id).await.is_err());
}
