//! Tenant credential generation and Argon2id hashing.
//!
//! The registry only produces the secret and its at-rest hash; handing
//! the raw secret to the actual infrastructure is the caller's job.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use tenantry_core::error::TenantryError;

/// Generate a cryptographically random opaque credential
/// (32 bytes → base64url-encoded, no padding).
pub fn generate_credential() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a credential to an Argon2id PHC-format string.
///
/// If `pepper` is provided it is prepended to the secret before
/// hashing — verification must use the same pepper.
pub fn hash_credential(secret: &str, pepper: Option<&str>) -> Result<String, TenantryError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{secret}");
            peppered.as_bytes()
        }
        None => secret.as_bytes(),
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(input, &salt)
        .map(|h| h.to_string())
        .map_err(|e| TenantryError::Crypto(format!("hash error: {e}")))
}

/// Verify a raw credential against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an error
/// if the stored hash is malformed.
pub fn verify_credential(
    secret: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, TenantryError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{secret}");
            peppered.as_bytes()
        }
        None => secret.as_bytes(),
    };

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| TenantryError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(TenantryError::Crypto(format!("verify error: {e}"))),
    }
}
