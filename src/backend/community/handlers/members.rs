/**
 * Member Handlers
 *
 * Other members' public pages and the follow graph between members.
 */

use axum::{
    extract::{Path, State},
    response::{Json, Response},
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::{get_user_by_username, User};
use crate::backend::community::db;
use crate::backend::community::models::{FollowEntry, MemberProfile};
use crate::backend::error::BackendError;
use crate::backend::middleware::{found, CurrentUser};

/// GET /users/{username}
pub async fn member_profile(
    State(pool): State<SqlitePool>,
    CurrentUser { username: viewer }: CurrentUser,
    Path(username): Path<String>,
) -> Result<Json<MemberProfile>, BackendError> {
    let user = load_member(&pool, &username).await?;
    let articles = db::fetch_articles_by_username(&pool, &username).await?;
    let follower_count = db::fetch_followers(&pool, &username).await?.len();
    let following_count = db::fetch_followings(&pool, &username).await?.len();
    let is_following = db::is_following(&pool, &viewer, &username).await?;

    Ok(Json(MemberProfile {
        user: UserResponse::from(user),
        articles,
        follower_count,
        following_count,
        is_following,
    }))
}

/// POST /users/{username}/follow
///
/// # Errors
///
/// * `400 Bad Request` - following yourself
/// * `404 Not Found` - no such member
pub async fn follow(
    State(pool): State<SqlitePool>,
    CurrentUser { username: viewer }: CurrentUser,
    Path(username): Path<String>,
) -> Result<Response, BackendError> {
    if viewer == username {
        return Err(BackendError::bad_request("You cannot follow yourself"));
    }
    load_member(&pool, &username).await?;

    if db::follow_user(&pool, &viewer, &username).await? {
        tracing::info!("{} now follows {}", viewer, username);
    }
    Ok(found(&format!("/users/{username}")))
}

/// POST /users/{username}/unfollow
pub async fn unfollow(
    State(pool): State<SqlitePool>,
    CurrentUser { username: viewer }: CurrentUser,
    Path(username): Path<String>,
) -> Result<Response, BackendError> {
    db::unfollow_user(&pool, &viewer, &username).await?;
    Ok(found(&format!("/users/{username}")))
}

/// GET /users/{username}/followers
pub async fn followers(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<Json<Vec<FollowEntry>>, BackendError> {
    load_member(&pool, &username).await?;
    Ok(Json(db::fetch_followers(&pool, &username).await?))
}

/// GET /users/{username}/followings
pub async fn followings(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<Json<Vec<FollowEntry>>, BackendError> {
    load_member(&pool, &username).await?;
    Ok(Json(db::fetch_followings(&pool, &username).await?))
}

async fn load_member(pool: &SqlitePool, username: &str) -> Result<User, BackendError> {
    get_user_by_username(pool, username)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))
}
