//! Composite access decisions.
//!
//! "Not allowed" is an expected outcome, so these are result values,
//! not errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    TenantNotFound,
    TenantNotActive,
    QuotaExceeded,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DenialReason::TenantNotFound => "Tenant not found",
            DenialReason::TenantNotActive => "Tenant is not active",
            DenialReason::QuotaExceeded => "Resource quota exceeded",
        };
        f.write_str(s)
    }
}

/// Outcome of `validate_tenant_access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: Option<DenialReason>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}
