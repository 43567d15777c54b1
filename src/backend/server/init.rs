/**
 * Server Initialization
 *
 * This module builds the application state and the router from a
 * `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the database and apply migrations
 * 2. Pick the session store backend
 * 3. Build the password hasher with the configured cost
 * 4. Start the expired-session purge task (only when a TTL is set)
 * 5. Create the router
 */

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::cookies::CookieSettings;
use crate::backend::auth::memory_store::MemorySessionStore;
use crate::backend::auth::password::{AuthError, BcryptHasher};
use crate::backend::auth::sessions::SessionStore;
use crate::backend::auth::sql_store::SqlSessionStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig, SessionBackend};
use crate::backend::server::state::AppState;

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database initialization failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid password hasher settings: {0}")]
    Hasher(#[from] AuthError),
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Unlike optional services, the database is required; a connection or
/// migration failure aborts startup.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing fanpub backend server");

    let db_pool = load_database(&config.database_url).await?;
    let app_state = build_state(config, db_pool)?;

    if config.session_ttl.is_some() {
        spawn_purge_task(app_state.sessions.clone(), config.purge_interval);
    }

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}

/// Assemble `AppState` around an already-migrated pool
pub fn build_state(config: &ServerConfig, db_pool: SqlitePool) -> Result<AppState, InitError> {
    let sessions: Arc<dyn SessionStore> = match (config.session_backend, config.session_ttl) {
        (SessionBackend::Memory, None) => Arc::new(MemorySessionStore::new()),
        (SessionBackend::Memory, Some(ttl)) => Arc::new(MemorySessionStore::with_ttl(ttl)),
        (SessionBackend::Sql, None) => Arc::new(SqlSessionStore::new(db_pool.clone())),
        (SessionBackend::Sql, Some(ttl)) => {
            Arc::new(SqlSessionStore::with_ttl(db_pool.clone(), ttl))
        }
    };
    tracing::info!("Session store: {:?}", config.session_backend);

    let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost)?);

    let cookie_settings = CookieSettings {
        secure: config.cookie_secure,
        max_age_secs: config
            .session_ttl
            .and_then(|ttl| i64::try_from(ttl.as_secs()).ok()),
    };

    Ok(AppState::new(db_pool, sessions, hasher, cookie_settings))
}

/// Periodically drop expired sessions
fn spawn_purge_task(store: Arc<dyn SessionStore>, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Purged {} expired sessions", removed),
                Err(e) => tracing::error!("Session purge failed: {}", e),
            }
        }
    });
}
