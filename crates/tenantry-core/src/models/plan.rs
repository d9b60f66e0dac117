//! Subscription plans and the plan quota table.
//!
//! The quota table is a design-level constant, not configuration: it is
//! the single source of truth both for the quota assigned at tenant
//! creation and for the recompute on a plan change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TenantryError;

/// A named subscription tier that determines default quota limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    #[default]
    Standard,
    Premium,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Basic, Plan::Standard, Plan::Premium, Plan::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
            Plan::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = TenantryError;

    /// Unknown plan names are rejected rather than silently falling
    /// back to a default tier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Plan::Basic),
            "standard" => Ok(Plan::Standard),
            "premium" => Ok(Plan::Premium),
            "enterprise" => Ok(Plan::Enterprise),
            other => Err(TenantryError::Validation {
                message: format!("unknown plan: {other}"),
            }),
        }
    }
}

/// A measurable resource a tenant may consume.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    /// CPU cores.
    Cpu,
    /// Memory in MiB.
    Memory,
    /// Storage in GiB.
    Storage,
    /// Monthly transfer in GiB.
    Bandwidth,
    /// API calls per month.
    ApiCalls,
    /// Seats.
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Cpu,
        ResourceKind::Memory,
        ResourceKind::Storage,
        ResourceKind::Bandwidth,
        ResourceKind::ApiCalls,
        ResourceKind::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "cpu",
            ResourceKind::Memory => "memory",
            ResourceKind::Storage => "storage",
            ResourceKind::Bandwidth => "bandwidth",
            ResourceKind::ApiCalls => "apiCalls",
            ResourceKind::Users => "users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = TenantryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(ResourceKind::Cpu),
            "memory" => Ok(ResourceKind::Memory),
            "storage" => Ok(ResourceKind::Storage),
            "bandwidth" => Ok(ResourceKind::Bandwidth),
            "apiCalls" => Ok(ResourceKind::ApiCalls),
            "users" => Ok(ResourceKind::Users),
            other => Err(TenantryError::Validation {
                message: format!("unknown resource: {other}"),
            }),
        }
    }
}

/// A quota ceiling: either a finite amount or the unlimited sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaLimit {
    Limited(u64),
    Unlimited,
}

impl QuotaLimit {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, QuotaLimit::Unlimited)
    }

    /// Remaining headroom given current usage. `None` means unlimited.
    /// Saturates at zero if usage has already overshot the limit.
    pub fn headroom(&self, usage: u64) -> Option<u64> {
        match self {
            QuotaLimit::Unlimited => None,
            QuotaLimit::Limited(limit) => Some(limit.saturating_sub(usage)),
        }
    }
}

impl fmt::Display for QuotaLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaLimit::Limited(n) => write!(f, "{n}"),
            QuotaLimit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Default quota limits for a plan, in [`ResourceKind::ALL`] order.
pub fn plan_limits(plan: Plan) -> [(ResourceKind, QuotaLimit); 6] {
    use QuotaLimit::{Limited, Unlimited};
    use ResourceKind::*;
    match plan {
        Plan::Basic => [
            (Cpu, Limited(2)),
            (Memory, Limited(4_096)),
            (Storage, Limited(10)),
            (Bandwidth, Limited(100)),
            (ApiCalls, Limited(10_000)),
            (Users, Limited(50)),
        ],
        Plan::Standard => [
            (Cpu, Limited(4)),
            (Memory, Limited(8_192)),
            (Storage, Limited(50)),
            (Bandwidth, Limited(500)),
            (ApiCalls, Limited(100_000)),
            (Users, Limited(200)),
        ],
        Plan::Premium => [
            (Cpu, Limited(8)),
            (Memory, Limited(16_384)),
            (Storage, Limited(200)),
            (Bandwidth, Limited(2_000)),
            (ApiCalls, Limited(1_000_000)),
            (Users, Limited(1_000)),
        ],
        Plan::Enterprise => [
            (Cpu, Unlimited),
            (Memory, Unlimited),
            (Storage, Unlimited),
            (Bandwidth, Unlimited),
            (ApiCalls, Unlimited),
            (Users, Unlimited),
        ],
    }
}

/// Feature flags enabled by default for a plan. Higher tiers are
/// supersets of lower ones.
pub fn plan_features(plan: Plan) -> Vec<(&'static str, bool)> {
    let tier = match plan {
        Plan::Basic => 0,
        Plan::Standard => 1,
        Plan::Premium => 2,
        Plan::Enterprise => 3,
    };
    vec![
        ("apiAccess", true),
        ("customBranding", tier >= 1),
        ("advancedAnalytics", tier >= 2),
        ("ssoIntegration", tier >= 2),
        ("dedicatedSupport", tier >= 3),
        ("auditLog", tier >= 3),
    ]
}
