//! Shared Error Types
//!
//! Rejections raised by the input rules in [`crate::shared::validation`].
//! They carry the offending field so the server can answer `400` with a
//! message the member can act on.
//!
//! ```rust
//! use fanpub::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username is required");
//! assert_eq!(error.field(), "username");
//! ```
use thiserror::Error;

/// Input rejected before it reaches storage
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Form field that was rejected
        field: String,
        message: String,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the rejected form field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }

    /// Text shown to the member who submitted the form
    pub fn user_message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}
