//! Shared Module
//!
//! Types that do not depend on the server stack: validation rules for user
//! input and the error type those rules report. Everything here compiles
//! without the `ssr` feature.

/// Shared error types
pub mod error;

/// Input validation for accounts and community entities
pub mod validation;

pub use error::SharedError;
pub use validation::{validate_password, validate_pub_id, validate_text, validate_username};
