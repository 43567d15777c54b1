//! Common test utilities and helpers
//!
//! - A full application router over an in-memory database
//! - Helpers for building form posts and reading responses
//! - Custom assertion macros

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod http;

#[cfg(feature = "ssr")]
pub use app::*;
#[cfg(feature = "ssr")]
pub use http::*;
