/**
 * Registration Handler
 *
 * This module implements POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username, password and nickname
 * 2. Reject usernames that are already taken (409)
 * 3. Hash the password with bcrypt
 * 4. Insert the member
 * 5. Log the new member in exactly as `login` does
 *
 * Two concurrent registrations for the same name can both pass the
 * pre-check; the loser hits the unique constraint, which maps to the same
 * 409.
 */

use axum::{
    extract::{Form, State},
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::backend::auth::handlers::login::{establish_session, HOME_PATH};
use crate::backend::auth::handlers::types::RegisterForm;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_username, is_unique_violation, NewUser};
use crate::backend::error::BackendError;
use crate::backend::middleware::found;
use crate::backend::server::state::AppState;
use crate::shared::{validate_password, validate_text, validate_username};

/// Longest accepted display name
pub const MAX_NICKNAME_LEN: usize = 50;

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, password or nickname
/// * `409 Conflict` - username already taken
/// * `500 Internal Server Error` - database, hashing or session store failure
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Response), BackendError> {
    tracing::info!("Registration request for: {}", form.username);

    validate_username(&form.username)?;
    validate_password(&form.password)?;

    let nickname = form
        .nickname
        .map(|nickname| nickname.trim().to_string())
        .filter(|nickname| !nickname.is_empty())
        .unwrap_or_else(|| form.username.clone());
    validate_text("nickname", &nickname, MAX_NICKNAME_LEN)?;

    if get_user_by_username(&state.db_pool, &form.username)
        .await?
        .is_some()
    {
        tracing::warn!("Username already taken: {}", form.username);
        return Err(BackendError::username_taken());
    }

    let password_hash = hash_password(state.hasher.clone(), form.password).await?;

    let new_user = NewUser {
        username: form.username,
        nickname,
        password_hash,
    };
    let user = match create_user(&state.db_pool, new_user).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Username taken during insert");
            return Err(BackendError::username_taken());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("User created successfully: {} (id {})", user.username, user.id);

    let jar = establish_session(&state, jar, &user).await?;
    Ok((jar, found(HOME_PATH)))
}
