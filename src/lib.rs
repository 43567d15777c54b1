//! fanpub - Main Library
//!
//! fanpub is a forum server for football fans: members register, log in,
//! post articles and comments, open "pub" communities, hold discussions
//! inside a pub, and follow other members and pubs.
//!
//! # Module Structure
//!
//! - **`shared`** - Validation rules and error types with no server
//!   dependencies
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and application state
//!   - Server-side sessions bound to the `session_id` cookie
//!   - The login gate protecting every member-only route
//!   - SQLite persistence for accounts and community content
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the
//!   `fanpub-server` binary
//!
//! # Usage
//!
//! ```rust,ignore
//! use fanpub::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state lives in `AppState`, which is cloned into every
//! handler. The session store and database pool are shared behind `Arc`
//! and are safe for concurrent use.

/// Shared types and validation
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
