/**
 * Server-Side Sessions
 *
 * This module defines the session store contract: an opaque token handed
 * to the browser in the `session_id` cookie maps to an attribute bag held
 * on the server.
 *
 * # Lifecycle
 *
 * - Login and registration call [`SessionStore::create`]
 * - Every protected request calls [`SessionStore::get`]
 * - Logout calls [`SessionStore::destroy`]
 * - A background task calls [`SessionStore::purge_expired`] when a TTL is
 *   configured
 *
 * Missing, forged and expired tokens are all `Ok(None)` from `get`. An
 * `Err` always means the backend itself failed.
 */

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Attribute holding the authenticated user's snapshot
pub const USER_KEY: &str = "user";

/// Random bytes per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Opaque session token
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token from the OS random source
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Token as sent in the cookie
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Attribute bag stored for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord {
    attributes: HashMap<String, Value>,
}

impl SessionRecord {
    /// Record holding a single attribute
    pub fn with(key: impl Into<String>, value: Value) -> Self {
        let mut record = Self::default();
        record.insert(key, value);
        record
    }

    /// Look up an attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Add or replace an attribute
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Username from the `"user"` attribute, if present and well-formed
    pub fn username(&self) -> Option<&str> {
        self.get(USER_KEY)?
            .get("username")?
            .as_str()
            .filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Session backend failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded
    #[error("Session record corrupt: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}

/// Keyed storage from [`SessionToken`] to [`SessionRecord`]
///
/// Implementations must be safe under concurrent use, and operations on
/// the same token must be linearizable.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session holding `{key: value}` and return its fresh token
    async fn create(&self, key: &str, value: Value) -> Result<SessionToken, StoreError>;

    /// Merge an attribute into a live session. Returns `false` when the
    /// token has no live record.
    async fn set(&self, token: &SessionToken, key: &str, value: Value)
        -> Result<bool, StoreError>;

    /// Fetch the record for `token`; `None` when missing or expired
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError>;

    /// Remove the record. Unknown tokens are ignored.
    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError>;

    /// Drop expired records, returning how many were removed
    async fn purge_expired(&self) -> Result<usize, StoreError>;

    /// `get` for a token that may be absent (no cookie sent)
    async fn lookup(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<Option<SessionRecord>, StoreError> {
        match token {
            Some(token) => self.get(token).await,
            None => Ok(None),
        }
    }
}
