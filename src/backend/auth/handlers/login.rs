/**
 * Login Handler
 *
 * This module implements POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up the member by username
 * 2. Verify the password against the bcrypt digest
 * 3. Open a session holding the member snapshot
 * 4. Set the `session_id` cookie and redirect to `/articles`
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords get the same 401 body
 * - A session that the browser already held is destroyed first
 * - Passwords and tokens are never logged
 */

use axum::{
    extract::{Form, State},
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::backend::auth::cookies::{session_cookie, token_from_jar};
use crate::backend::auth::handlers::types::LoginForm;
use crate::backend::auth::identity::start_session;
use crate::backend::auth::users::{find_user_by_credentials, User};
use crate::backend::error::BackendError;
use crate::backend::middleware::found;
use crate::backend::server::state::AppState;

/// Where members land after logging in or registering
pub const HOME_PATH: &str = "/articles";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown user or wrong password, same message for both
/// * `500 Internal Server Error` - database, hashing or session store failure;
///   no cookie is set
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Response), BackendError> {
    tracing::info!("Login request for: {}", form.username);

    let user = find_user_by_credentials(
        &state.db_pool,
        state.hasher.clone(),
        &form.username,
        &form.password,
    )
    .await?
    .ok_or_else(|| {
        tracing::warn!("Rejected login for: {}", form.username);
        BackendError::invalid_credentials()
    })?;

    let jar = establish_session(&state, jar, &user).await?;
    tracing::info!("User logged in successfully: {}", user.username);

    Ok((jar, found(HOME_PATH)))
}

/// Bind the browser to a fresh session for `user`
///
/// Shared by login and registration. Any session the browser was holding
/// is destroyed so a token never outlives a change of identity.
pub(crate) async fn establish_session(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> Result<CookieJar, BackendError> {
    if let Some(previous) = token_from_jar(&jar) {
        state.sessions.destroy(&previous).await?;
    }

    let token = start_session(state.sessions.as_ref(), user).await?;
    Ok(jar.add(session_cookie(&token, &state.cookie_settings)))
}
