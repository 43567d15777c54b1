/**
 * Identity Resolution
 *
 * Maps a session token to the member it belongs to. The session holds a
 * small snapshot taken at login; only the username from that snapshot is
 * trusted. Profile data is always re-read from the database so edits show
 * up immediately in every open session.
 */

use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::backend::auth::sessions::{SessionStore, SessionToken, StoreError, USER_KEY};
use crate::backend::auth::users::{get_user_by_username, User};

/// Snapshot stored under the `"user"` session attribute
pub fn session_snapshot(user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "nickname": user.nickname,
    })
}

/// Open a session for `user` and return its token
pub async fn start_session(
    store: &dyn SessionStore,
    user: &User,
) -> Result<SessionToken, StoreError> {
    let token = store.create(USER_KEY, session_snapshot(user)).await?;
    tracing::info!("Session started for {}", user.username);
    Ok(token)
}

/// Username bound to `token`, or `None` for no/unknown/expired sessions
pub async fn resolve_username(
    store: &dyn SessionStore,
    token: Option<&SessionToken>,
) -> Result<Option<String>, StoreError> {
    let record = store.lookup(token).await?;
    Ok(record.and_then(|record| record.username().map(str::to_string)))
}

/// Fresh user row for an authenticated username
pub async fn load_current_user(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    get_user_by_username(pool, username).await
}
