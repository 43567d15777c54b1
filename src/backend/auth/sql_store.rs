/**
 * SQL Session Store
 *
 * Durable session storage in the `sessions` table. Records are stored as
 * JSON text; expiry is kept as epoch milliseconds so it can be compared in
 * SQL. Sessions survive a server restart.
 */

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::{SessionRecord, SessionStore, SessionToken, StoreError};

/// Attempts at inserting a fresh token before giving up
const CREATE_ATTEMPTS: usize = 3;

/// Session store backed by the application database
#[derive(Debug, Clone)]
pub struct SqlSessionStore {
    pool: SqlitePool,
    ttl_millis: Option<i64>,
}

impl SqlSessionStore {
    /// Store whose sessions never expire
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ttl_millis: None,
        }
    }

    /// Store whose sessions expire `ttl` after creation
    pub fn with_ttl(pool: SqlitePool, ttl: Duration) -> Self {
        Self {
            pool,
            ttl_millis: i64::try_from(ttl.as_millis()).ok(),
        }
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[async_trait]
impl SessionStore for SqlSessionStore {
    async fn create(&self, key: &str, value: Value) -> Result<SessionToken, StoreError> {
        let data = serde_json::to_string(&SessionRecord::with(key, value))?;
        let now = Self::now_millis();
        let expires_at = self.ttl_millis.and_then(|ttl| now.checked_add(ttl));

        for _ in 0..CREATE_ATTEMPTS {
            let token = SessionToken::generate();
            let inserted = sqlx::query(
                r#"
                INSERT INTO sessions (token, data, created_at, expires_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(token.as_str())
            .bind(&data)
            .bind(now)
            .bind(expires_at)
            .execute(&self.pool)
            .await;

            match inserted {
                Ok(_) => return Ok(token),
                Err(e) if is_unique_violation(&e) => {
                    tracing::warn!("Session token collision, regenerating");
                }
                Err(e) => {
                    tracing::error!("Failed to store session: {:?}", e);
                    return Err(e.into());
                }
            }
        }

        Err(StoreError::Unavailable(
            "could not allocate a unique session token".to_string(),
        ))
    }

    async fn set(
        &self,
        token: &SessionToken,
        key: &str,
        value: Value,
    ) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT data FROM sessions
            WHERE token = ?1 AND (expires_at IS NULL OR expires_at > ?2)
            "#,
        )
        .bind(token.as_str())
        .bind(Self::now_millis())
        .fetch_optional(&mut *tx)
        .await?;

        let Some((data,)) = row else {
            return Ok(false);
        };

        let mut record: SessionRecord = serde_json::from_str(&data)?;
        record.insert(key, value);

        sqlx::query("UPDATE sessions SET data = ?1 WHERE token = ?2")
            .bind(serde_json::to_string(&record)?)
            .bind(token.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT data FROM sessions
            WHERE token = ?1 AND (expires_at IS NULL OR expires_at > ?2)
            "#,
        )
        .bind(token.as_str())
        .bind(Self::now_millis())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    async fn destroy(&self, token: &SessionToken) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let result = sqlx::query(
            "DELETE FROM sessions WHERE expires_at IS NOT NULL AND expires_at <= ?1",
        )
        .bind(Self::now_millis())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() as usize)
    }
}
