//! Resource quota record and quota-check results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::{QuotaLimit, ResourceKind};

/// Per-tenant quota ledger: plan-derived ceilings plus running usage
/// counters, one entry per [`ResourceKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceQuota {
    pub tenant_id: Uuid,
    pub limits: BTreeMap<ResourceKind, QuotaLimit>,
    pub usage: BTreeMap<ResourceKind, u64>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceQuota {
    /// Build a fresh quota with zeroed usage from a limit table.
    pub fn new(
        tenant_id: Uuid,
        limits: impl IntoIterator<Item = (ResourceKind, QuotaLimit)>,
    ) -> Self {
        let limits: BTreeMap<_, _> = limits.into_iter().collect();
        let usage = limits.keys().map(|kind| (*kind, 0)).collect();
        Self {
            tenant_id,
            limits,
            usage,
            updated_at: Utc::now(),
        }
    }

    pub fn limit(&self, kind: ResourceKind) -> QuotaLimit {
        self.limits
            .get(&kind)
            .copied()
            .unwrap_or(QuotaLimit::Limited(0))
    }

    pub fn usage(&self, kind: ResourceKind) -> u64 {
        self.usage.get(&kind).copied().unwrap_or(0)
    }

    /// Advisory check: would `amount` more units of `kind` fit? Pure
    /// read — nothing is reserved or committed.
    pub fn check(&self, kind: ResourceKind, amount: u64) -> QuotaCheck {
        let limit = self.limit(kind);
        let current_usage = self.usage(kind);
        match limit.headroom(current_usage) {
            None => QuotaCheck {
                allowed: true,
                limit,
                current_usage,
                remaining: QuotaLimit::Unlimited,
            },
            Some(headroom) => QuotaCheck {
                allowed: headroom >= amount,
                limit,
                current_usage,
                remaining: QuotaLimit::Limited(headroom),
            },
        }
    }

    /// Apply a signed usage delta without clamping to the limit.
    /// Negative deltas (resource release) saturate at zero. Returns the
    /// new counter value.
    pub fn apply_usage_delta(&mut self, kind: ResourceKind, delta: i64) -> u64 {
        let entry = self.usage.entry(kind).or_insert(0);
        *entry = if delta >= 0 {
            entry.saturating_add(delta as u64)
        } else {
            entry.saturating_sub(delta.unsigned_abs())
        };
        self.updated_at = Utc::now();
        *entry
    }
}

/// Result of a quota check or reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCheck {
    pub allowed: bool,
    pub limit: QuotaLimit,
    pub current_usage: u64,
    /// Headroom before this request; `Unlimited` mirrors the limit.
    pub remaining: QuotaLimit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{Plan, plan_limits};

    fn quota(plan: Plan) -> ResourceQuota {
        ResourceQuota::new(Uuid::new_v4(), plan_limits(plan))
    }

    #[test]
    fn fresh_quota_has_zero_usage() {
        let q = quota(Plan::Basic);
        for kind in ResourceKind::ALL {
            assert_eq!(q.usage(kind), 0);
        }
    }

    #[test]
    fn check_against_headroom() {
        let mut q = quota(Plan::Basic);
        let ok = q.check(ResourceKind::Users, 40);
        assert!(ok.allowed);
        assert_eq!(ok.remaining, QuotaLimit::Limited(50));

        assert_eq!(q.apply_usage_delta(ResourceKind::Users, 45), 45);
        let denied = q.check(ResourceKind::Users, 10);
        assert!(!denied.allowed);
        assert_eq!(denied.current_usage, 45);
        assert_eq!(denied.limit, QuotaLimit::Limited(50));
        assert_eq!(denied.remaining, QuotaLimit::Limited(5));
    }

    #[test]
    fn unlimited_is_always_allowed() {
        let mut q = quota(Plan::Enterprise);
        q.apply_usage_delta(ResourceKind::ApiCalls, i64::MAX);
        let check = q.check(ResourceKind::ApiCalls, u64::MAX);
        assert!(check.allowed);
        assert_eq!(check.remaining, QuotaLimit::Unlimited);
    }

    #[test]
    fn delta_is_unclamped_up_and_saturating_down() {
        let mut q = quota(Plan::Basic);
        // An unguarded caller can push past the limit.
        assert_eq!(q.apply_usage_delta(ResourceKind::Users, 80), 80);
        assert!(!q.check(ResourceKind::Users, 1).allowed);
        // Releases never underflow.
        assert_eq!(q.apply_usage_delta(ResourceKind::Users, -100), 0);
    }
}
