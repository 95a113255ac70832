//! # Credentials
//!
//! Password hashing for the user directory. Stored credentials are Argon2
//! PHC strings (`$argon2id$v=19$...`) carrying their own salt and params.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{CoreError, CoreResult};

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoreError::Credential(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC string.
///
/// A malformed stored hash never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
