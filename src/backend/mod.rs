//! Backend Module
//!
//! This module contains all server-side code for fanpub: an Axum HTTP
//! server with cookie-bound server-side sessions and a SQLite database.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route groups and router assembly
//! - **`auth`** - Passwords, sessions, accounts and the auth handlers
//! - **`middleware`** - The login gate and identity extractors
//! - **`community`** - Articles, pubs, discussions and follows
//! - **`error`** - The HTTP-facing error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and sessions
//! ├── middleware/     - Login gate
//! ├── community/      - Community features
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. The browser sends its `session_id` cookie
//! 2. For protected routes, `require_login` resolves the cookie through
//!    the session store; no live session means `302` to `/`
//! 3. Handlers read the identity through `CurrentUser` or `AuthUser`
//! 4. Errors become JSON bodies via `BackendError`
//!
//! # Thread Safety
//!
//! - The session store is shared as `Arc<dyn SessionStore>`; the in-memory
//!   backend guards its map with a `tokio::sync::RwLock`
//! - The `SqlitePool` is cloned into handlers
//! - bcrypt runs on the blocking thread pool

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and session management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Articles, pubs, discussions and follows
#[cfg(feature = "ssr")]
pub mod community;

#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState, ServerConfig};
