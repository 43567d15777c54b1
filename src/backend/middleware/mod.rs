//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - The login gate for protected routes and the identity
//!   extractors handlers use behind it
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use fanpub::backend::middleware::require_login;
//!
//! let protected = Router::new()
//!     .route("/me", get(get_me))
//!     .route_layer(from_fn_with_state(state.clone(), require_login));
//! ```

pub mod auth;

pub use auth::{found, require_login, AuthUser, CurrentUser, LANDING_PATH};
