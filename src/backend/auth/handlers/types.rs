/**
 * Authentication Handler Types
 *
 * Form bodies accepted by the login, registration and profile handlers,
 * and the public view of a member returned to clients.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Login form
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginForm {
    pub username: String,
    /// Checked against the stored bcrypt digest, never logged
    pub password: String,
}

/// Registration form
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterForm {
    /// Chosen username (3-30 chars, starts with a letter, alphanumeric + underscore)
    pub username: String,
    /// Password (hashed before storage)
    pub password: String,
    /// Display name; defaults to the username
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Member view safe to return to clients
///
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub your_club: Option<String>,
    pub your_league: Option<String>,
    pub your_nation: Option<String>,
    pub profile: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub sns: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
            your_club: user.your_club,
            your_league: user.your_league,
            your_nation: user.your_nation,
            profile: user.profile,
            twitter: user.twitter,
            instagram: user.instagram,
            sns: user.sns,
            created_at: user.created_at,
        }
    }
}
