//! Password storage and the new-password policy.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters are
//! stored alongside the digest and old hashes keep verifying if the
//! defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use pulse_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// `Ok(false)` on a mismatch. A stored hash that does not parse is an
/// internal error, never a failed login.
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    let outcome = PasswordHash::new(stored)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed));
    match outcome {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(format!(
            "Password verification error: {e}"
        ))),
    }
}

/// Rules a newly chosen password must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl PasswordPolicy {
    /// Length is counted in characters, not bytes.
    pub fn check(&self, password: &str, confirmation: &str) -> Result<(), CoreError> {
        if password.chars().count() < self.min_length {
            return Err(CoreError::Validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if password != confirmation {
            return Err(CoreError::Validation(
                "Password confirmation does not match".into(),
            ));
        }
        Ok(())
    }
}
