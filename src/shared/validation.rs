/**
 * Input Validation
 *
 * Rules applied to form input before it reaches the database. Each
 * function returns the field name alongside the message so handlers can
 * report which input was rejected.
 */

use crate::shared::error::SharedError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum accepted length for titles, names and short text fields
pub const MAX_TITLE_LEN: usize = 200;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    if username.len() < 3 || username.len() > 30 {
        return Err(SharedError::validation(
            "username",
            "Username must be 3-30 characters long",
        ));
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(SharedError::validation(
                "username",
                "Username must start with a letter",
            ))
        }
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SharedError::validation(
            "username",
            "Username may only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Validate a pub identifier (used in URLs, so kept to a slug alphabet)
pub fn validate_pub_id(pub_id: &str) -> Result<(), SharedError> {
    if pub_id.is_empty() || pub_id.len() > 64 {
        return Err(SharedError::validation(
            "community_id",
            "Community ID must be 1-64 characters long",
        ));
    }
    if !pub_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SharedError::validation(
            "community_id",
            "Community ID may only contain letters, numbers, '-' and '_'",
        ));
    }
    Ok(())
}

/// Validate a required free-text field
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max_len),
        ));
    }
    Ok(())
}
