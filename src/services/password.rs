//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) so the salt and
//! parameters travel with the hash. Hashing and verification run on the
//! blocking pool.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::repos::error::RepoError;

/// Hash verified against when no account matches, so unknown emails cost the
/// same as wrong passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_blocking("dummy password for unknown accounts").ok());

pub async fn hash_password(password: &str) -> Result<String, RepoError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| RepoError::PasswordHash(e.to_string()))?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, RepoError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| RepoError::PasswordHash(e.to_string()))?
}

/// Runs a full verification that can never succeed.
pub async fn verify_unknown_account(password: &str) {
    let password = password.to_string();
    let result = tokio::task::spawn_blocking(move || match DUMMY_HASH.as_deref() {
        Some(hash) => verify_blocking(&password, hash).map(|_| ()),
        None => Err(RepoError::PasswordHash("dummy hash unavailable".to_string())),
    })
    .await;

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "dummy password verification failed"),
        Err(e) => tracing::warn!(error = %e, "dummy password verification panicked"),
    }
}

fn hash_blocking(password: &str) -> Result<String, RepoError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RepoError::PasswordHash(e.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, RepoError> {
    let parsed = PasswordHash::new(hash).map_err(|e| RepoError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
