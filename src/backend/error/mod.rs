//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation Policy
//!
//! - Bad credentials and validation failures are recovered locally and
//!   rendered as a readable message
//! - A missing session is never an error; the login gate redirects instead
//! - Session store and database failures abort the request with a 500

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, INVALID_CREDENTIALS, USERNAME_TAKEN};
