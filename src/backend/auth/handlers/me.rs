/**
 * Get Current User Handler
 *
 * GET /me returns the logged-in member, read fresh from the database.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// Runs behind the login gate; the `AuthUser` extractor has already
/// re-fetched the row by username.
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
