/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once in `create_app` and cloned into every handler.
 * It holds:
 * - The SQLite connection pool
 * - The session store
 * - The password hasher
 * - Session cookie attributes
 *
 * The store and hasher sit behind `Arc<dyn ...>` so the backend can be
 * chosen at startup and swapped in tests.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::cookies::CookieSettings;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::SessionStore;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Session store, shared by every request
    pub sessions: Arc<dyn SessionStore>,

    /// Password hasher used by login and registration
    pub hasher: Arc<dyn PasswordHasher>,

    /// Attributes for the `session_id` cookie
    pub cookie_settings: CookieSettings,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        cookie_settings: CookieSettings,
    ) -> Self {
        Self {
            db_pool,
            sessions,
            hasher,
            cookie_settings,
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows handlers that only touch the database to extract
/// `State<SqlitePool>` directly.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<dyn SessionStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PasswordHasher> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hasher.clone()
    }
}
