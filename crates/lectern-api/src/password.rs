//! Argon2 password hashing and verification.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::ApiError;

/// Hash a password into a PHC string with a fresh random salt.
///
/// Used by the dev binary's seed data and by tests; production records
/// arrive from the persistence collaborator already hashed.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| ApiError::Internal(format!("salt generation failed: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| ApiError::Internal(format!("salt encoding failed: {e}")))?;
    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?
        .to_string();
    Ok(phc)
}

/// Verify a password against a PHC string hash.
///
/// An unparseable hash verifies as false rather than erroring: a corrupt
/// record must not become a login oracle.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}
