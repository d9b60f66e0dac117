//! Registry configuration.

use tenantry_core::models::plan::Plan;

/// Configuration for the tenant registry service.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Plan assigned when a create request names none.
    pub default_plan: Plan,
    /// Host handed out in generated tenant database params.
    pub database_host: String,
    /// Optional pepper prepended to credentials before Argon2id hashing.
    pub pepper: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_plan: Plan::Standard,
            database_host: "db.internal".into(),
            pepper: None,
        }
    }
}
