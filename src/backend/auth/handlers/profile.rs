/**
 * Profile Handlers
 *
 * GET /profile_update returns the editable profile; POST /profile_update
 * overwrites it and redirects to the article list. After a successful
 * update the session snapshot is refreshed too, though handlers never
 * read profile data from it.
 */

use axum::{
    extract::{Form, State},
    response::{Json, Response},
};
use axum_extra::extract::CookieJar;

use crate::backend::auth::cookies::token_from_jar;
use crate::backend::auth::handlers::login::HOME_PATH;
use crate::backend::auth::handlers::signup::MAX_NICKNAME_LEN;
use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::identity::session_snapshot;
use crate::backend::auth::sessions::USER_KEY;
use crate::backend::auth::users::{update_profile, ProfileUpdate};
use crate::backend::error::BackendError;
use crate::backend::middleware::{found, AuthUser, CurrentUser};
use crate::backend::server::state::AppState;
use crate::shared::validate_text;

/// Upper bound for each optional profile field
const MAX_PROFILE_FIELD_LEN: usize = 1000;

pub async fn profile_page(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Profile update handler
///
/// # Errors
///
/// * `400 Bad Request` - empty nickname or an over-long field
/// * `500 Internal Server Error` - database or session store failure
pub async fn profile_update(
    State(state): State<AppState>,
    CurrentUser { username }: CurrentUser,
    jar: CookieJar,
    Form(update): Form<ProfileUpdate>,
) -> Result<Response, BackendError> {
    validate_text("nickname", &update.nickname, MAX_NICKNAME_LEN)?;
    let optional_fields = [
        ("your_club", &update.your_club),
        ("your_league", &update.your_league),
        ("your_nation", &update.your_nation),
        ("profile", &update.profile),
        ("twitter", &update.twitter),
        ("instagram", &update.instagram),
        ("sns", &update.sns),
    ];
    for (field, value) in optional_fields {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            validate_text(field, value, MAX_PROFILE_FIELD_LEN)?;
        }
    }

    let Some(user) = update_profile(&state.db_pool, &username, &update).await? else {
        return Err(BackendError::not_found("User not found"));
    };
    tracing::info!("Profile updated for {}", user.username);

    if let Some(token) = token_from_jar(&jar) {
        state
            .sessions
            .set(&token, USER_KEY, session_snapshot(&user))
            .await?;
    }

    Ok(found(HOME_PATH))
}
