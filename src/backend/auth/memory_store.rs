/**
 * In-Memory Session Store
 *
 * Process-wide session storage in an `Arc<RwLock<HashMap>>`. Sessions
 * live for the lifetime of the process unless a TTL is configured.
 * Every operation holds the lock, so a `destroy` followed by a `get` on
 * the same token always observes the destroy.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::backend::auth::sessions::{SessionRecord, SessionStore, SessionToken, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    record: SessionRecord,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Session store backed by a lock-protected map
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Entry>>>,
    ttl: Option<chrono::Duration>,
}

impl MemorySessionStore {
    /// Store whose sessions never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions expire `ttl` after creation
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl: chrono::Duration::from_std(ttl).ok(),
        }
    }

    /// Number of records held, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.ttl.and_then(|ttl| now.checked_add_signed(ttl))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, key: &str, value: Value) -> Result<SessionToken, StoreError> {
        let now = Utc::now();
        let entry = Entry {
            record: SessionRecord::with(key, value),
            expires_at: self.expiry_from(now),
        };

        let mut sessions = self.sessions.write().await;
        let mut token = SessionToken::generate();
        while sessions.contains_key(&token) {
            tracing::warn!("Session token collision, regenerating");
            token = SessionToken::generate();
        }
        sessions.insert(token.clone(), entry);
        tracing::debug!("Session created ({} live)", sessions.len());

        Ok(token)
    }

    async fn set(
        &self,
        token: &SessionToken,
        key: &str,
        value: Value,
    ) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(token) {
            Some(entry) if !entry.is_expired(Utc::now()) => {
                entry.record.insert(key, value);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|entry| !entry.is_expired(Utc::now()))
            .map(|entry| entry.record.clone()))
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        Ok(before - sessions.len())
    }
}
