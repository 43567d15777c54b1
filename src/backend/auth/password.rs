/**
 * Password Hashing
 *
 * One-way transform of a plaintext password into the digest stored in the
 * `users.password_hash` column, and the matching verification used at
 * login.
 *
 * # Security
 *
 * - bcrypt with a random per-password salt, so two users with the same
 *   password never share a digest
 * - Cost is configurable (`BCRYPT_COST`); tests use the bcrypt minimum
 * - Hashing is CPU-bound, so the async helpers run it on the blocking pool
 */

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while hashing or verifying a password
#[derive(Debug, Error)]
pub enum AuthError {
    /// The hashing library rejected the input or the stored digest
    #[error("Password hashing failed: {0}")]
    Hash(String),

    /// The configured cost is outside what the algorithm accepts
    #[error("Invalid hashing cost {0}")]
    InvalidCost(u32),

    /// The blocking hashing task panicked or was cancelled
    #[error("Password hashing task failed: {0}")]
    Task(String),
}

/// Lowest bcrypt work factor
pub const MIN_COST: u32 = 4;

/// Highest bcrypt work factor
pub const MAX_COST: u32 = 31;

/// Plaintext behind every hasher's decoy digest
const DECOY_PASSWORD: &str = "fanpub-decoy-password";

/// One-way password digest
///
/// `verify(p, hash(p))` must hold for every `p`, and a digest must not
/// verify any other password.
pub trait PasswordHasher: Send + Sync {
    /// Produce the digest stored for `plaintext`
    fn hash(&self, plaintext: &str) -> Result<String, AuthError>;

    /// Check `plaintext` against a stored digest
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, AuthError>;

    /// Digest verified when no account matches the username, at the same
    /// cost as real digests
    fn decoy_digest(&self) -> &str;
}

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
    decoy: Arc<str>,
}

impl BcryptHasher {
    /// Create a hasher with the given work factor (`MIN_COST..=MAX_COST`)
    ///
    /// Hashes the decoy once up front, so this takes as long as one login.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::InvalidCost(cost));
        }
        let decoy = bcrypt::hash(DECOY_PASSWORD, cost).map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Self {
            cost,
            decoy: decoy.into(),
        })
    }

    /// Work factor used for new digests
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, AuthError> {
        bcrypt::verify(plaintext, digest).map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn decoy_digest(&self) -> &str {
        &self.decoy
    }
}

/// Hash a password on the blocking thread pool
pub async fn hash_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Task(e.to_string()))?
}

/// Verify a password on the blocking thread pool
pub async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    digest: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
        .await
        .map_err(|e| AuthError::Task(e.to_string()))?
}
