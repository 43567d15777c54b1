/**
 * Logout Handler
 *
 * GET /logout destroys the browser's session, removes the `session_id`
 * cookie and redirects to the landing page. It is not behind the login
 * gate: a stale or forged cookie is still cleared.
 */

use std::sync::Arc;

use axum::{extract::State, response::Response};
use axum_extra::extract::CookieJar;

use crate::backend::auth::cookies::{removal_cookie, token_from_jar};
use crate::backend::auth::sessions::SessionStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::{found, LANDING_PATH};

/// Logout handler
///
/// # Errors
///
/// * `500 Internal Server Error` - the session store could not be reached
pub async fn logout(
    State(sessions): State<Arc<dyn SessionStore>>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), BackendError> {
    if let Some(token) = token_from_jar(&jar) {
        sessions.destroy(&token).await?;
        tracing::info!("Session destroyed");
    }

    Ok((jar.remove(removal_cookie()), found(LANDING_PATH)))
}
