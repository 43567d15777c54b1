/**
 * User Model and Database Operations
 *
 * This module handles member accounts and their profile fields. Lookups
 * return `Ok(None)` when nothing matches; `Err` is reserved for storage
 * faults.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::auth::password::{verify_password, AuthError, PasswordHasher};

const USER_COLUMNS: &str = "id, username, password_hash, nickname, your_club, your_league, \
     your_nation, profile, twitter, instagram, sns, created_at, updated_at";

/// User struct representing a member in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row ID
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Display name
    pub nickname: String,
    /// Supported club
    pub your_club: Option<String>,
    /// Followed league
    pub your_league: Option<String>,
    /// National team
    pub your_nation: Option<String>,
    /// Free-form profile text
    pub profile: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    /// Any other social link
    pub sns: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a new member
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub nickname: String,
    pub password_hash: String,
}

/// Editable profile fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub nickname: String,
    pub your_club: Option<String>,
    pub your_league: Option<String>,
    pub your_nation: Option<String>,
    pub profile: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub sns: Option<String>,
}

/// Errors from credential checks, which touch both storage and hashing
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Hash(#[from] AuthError),
}

/// Create a new user
///
/// A duplicate username surfaces as a unique-constraint `sqlx::Error`;
/// see [`is_unique_violation`].
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, password_hash, nickname, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.nickname)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find the user whose username and password both match
///
/// Unknown usernames and wrong passwords are both `Ok(None)` so callers
/// cannot tell them apart. An unknown username still runs one verify,
/// against the hasher's decoy digest, so both paths take equally long.
pub async fn find_user_by_credentials(
    pool: &SqlitePool,
    hasher: Arc<dyn PasswordHasher>,
    username: &str,
    password: &str,
) -> Result<Option<User>, CredentialError> {
    let Some(user) = get_user_by_username(pool, username).await? else {
        let decoy = hasher.decoy_digest().to_string();
        verify_password(hasher, password.to_string(), decoy).await?;
        return Ok(None);
    };

    let valid = verify_password(hasher, password.to_string(), user.password_hash.clone()).await?;
    Ok(valid.then_some(user))
}

/// Overwrite a member's profile fields
///
/// Returns the updated row, or `None` if the username does not exist.
pub async fn update_profile(
    pool: &SqlitePool,
    username: &str,
    update: &ProfileUpdate,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET nickname = ?1, your_club = ?2, your_league = ?3, your_nation = ?4,
            profile = ?5, twitter = ?6, instagram = ?7, sns = ?8, updated_at = ?9
        WHERE username = ?10
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&update.nickname)
    .bind(&update.your_club)
    .bind(&update.your_league)
    .bind(&update.your_nation)
    .bind(&update.profile)
    .bind(&update.twitter)
    .bind(&update.instagram)
    .bind(&update.sns)
    .bind(Utc::now())
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Members whose profile text or nickname contains `keyword`
pub async fn search_users(
    pool: &SqlitePool,
    keyword: &str,
    limit: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = format!("%{}%", keyword);
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS} FROM users
        WHERE profile LIKE ?1 OR nickname LIKE ?1
        ORDER BY username
        LIMIT ?2
        "#
    ))
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Whether an insert failed because the row already exists
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
