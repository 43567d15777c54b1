/**
 * Backend Error Types
 *
 * This module defines the error returned by HTTP handlers. Each variant
 * maps to one HTTP status code.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Recoverable conditions reported to the user with a readable message:
 * - Bad credentials (401, one generic message for every cause)
 * - Username already taken (409)
 * - Missing entities (404) and foreign entities (403)
 *
 * ## Storage Errors
 *
 * The session store or the database failed. These abort the request with
 * a 500 and are never turned into "not logged in".
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::AuthError;
use crate::backend::auth::sessions::StoreError;
use crate::backend::auth::users::CredentialError;
use crate::shared::SharedError;

/// Message for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Message for registrations that collide with an existing account
pub const USERNAME_TAKEN: &str = "Username already taken";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (bad input, conflicts, etc.)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Session store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Rejected form input
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Failed login; identical for unknown users and wrong passwords
    pub fn invalid_credentials() -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
    }

    /// Registration collided with an existing username
    pub fn username_taken() -> Self {
        Self::handler(StatusCode::CONFLICT, USERNAME_TAKEN)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Store`, `Database`, `Auth` - 500 Internal Server Error
    /// - `SharedError` - 400 Bad Request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Store(_) | Self::Database(_) | Self::Auth(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to the client
    ///
    /// Storage and hashing details stay in the server log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.user_message().to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<CredentialError> for BackendError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Database(e) => Self::Database(e),
            CredentialError::Hash(e) => Self::Auth(e),
        }
    }
}
