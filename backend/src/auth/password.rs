//! Password hashing using argon2
//!
//! One-way transformation of plaintext passwords into a storage-safe
//! form, and verification against that form. Hashing is CPU-intensive on
//! purpose; async callers use the `_async` wrappers so the work lands on
//! the blocking thread pool instead of stalling the request threads.

use anyhow::{ensure, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

pub use auth_service_shared::validation::MIN_PASSWORD_LEN;

/// Password hashing service
///
/// Argon2id with a per-call random salt: hashing the same plaintext twice
/// yields two different strings, and both verify.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    ///
    /// Plaintexts shorter than [`MIN_PASSWORD_LEN`] are rejected before
    /// any hashing work happens.
    pub fn hash(password: &str) -> Result<String> {
        ensure!(
            password.len() >= MIN_PASSWORD_LEN,
            "password must be at least {MIN_PASSWORD_LEN} characters"
        );

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Comparison inside argon2 is constant-time. A malformed stored hash
    /// fails verification rather than crashing: corrupt storage rejects
    /// the login.
    pub fn verify(password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("task join error: {}", e))?
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("task join error: {}", e))
    }
}
