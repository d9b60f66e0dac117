//! Error types for the tenantry system.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TenantryError {
    #[error("Tenant not found: {id}")]
    TenantNotFound { id: Uuid },

    #[error("No tenant for domain: {domain}")]
    DomainNotFound { domain: String },

    #[error("No quota record for tenant: {id}")]
    QuotaNotFound { id: Uuid },

    #[error("Domain or subdomain already registered: {domain}")]
    DuplicateDomain { domain: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Cryptography error: {0}")]
    Crypto(String),

    /// Reserved for persistent store backends; the in-memory store
    /// never produces it.
    #[error("Store error: {0}")]
    Store(String),
}

pub type TenantryResult<T> = Result<T, TenantryError>;
