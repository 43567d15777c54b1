/**
 * Authentication Middleware
 *
 * This module protects routes that require a logged-in member. The
 * `session_id` cookie is resolved through the session store; requests
 * without a live session are redirected to the landing page before the
 * handler runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::backend::auth::cookies::token_from_jar;
use crate::backend::auth::identity::{load_current_user, resolve_username};
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Where anonymous visitors are sent
pub const LANDING_PATH: &str = "/";

/// Identity attached to the request by [`require_login`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

/// `302 Found` to `location` with an empty body
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Login gate
///
/// This middleware:
/// 1. Reads the `session_id` cookie
/// 2. Looks the token up in the session store
/// 3. Attaches `CurrentUser` to the request extensions
///
/// A missing cookie or a missing/expired session redirects to `/` and the
/// wrapped handler is never invoked. A session store failure is a 500.
pub async fn require_login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = token_from_jar(&jar);

    let Some(username) = resolve_username(app_state.sessions.as_ref(), token.as_ref()).await?
    else {
        tracing::warn!(
            "No live session for {} {}; redirecting",
            request.method(),
            request.uri().path()
        );
        return Ok(found(LANDING_PATH));
    };

    request.extensions_mut().insert(CurrentUser { username });

    Ok(next.run(request).await)
}

/// Axum extractor for the gated username
///
/// Only usable behind [`require_login`]; on an ungated route it redirects
/// like an anonymous request.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentUser not found in request extensions");
                found(LANDING_PATH)
            })
    }
}

/// Axum extractor for the member's current database row
///
/// The row is re-read on every request, so profile edits are visible at
/// once. A member deleted since login is treated as logged out.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;

        match load_current_user(&state.db_pool, &current.username).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => {
                tracing::warn!("Session user {} no longer exists", current.username);
                Err(found(LANDING_PATH))
            }
            Err(e) => Err(BackendError::from(e).into_response()),
        }
    }
}
