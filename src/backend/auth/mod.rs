//! Authentication Module
//!
//! This module handles member accounts, password hashing, the session
//! store and the handlers that log members in and out.
//!
//! # Architecture
//!
//! - **`password`** - `PasswordHasher` trait and the bcrypt implementation
//! - **`sessions`** - Session tokens, records and the `SessionStore` trait
//! - **`memory_store`** / **`sql_store`** - The two session store backends
//! - **`identity`** - Token to username to fresh user row
//! - **`cookies`** - The `session_id` cookie
//! - **`users`** - User model and database operations
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - Session store contract
//! ├── memory_store.rs - In-process session store
//! ├── sql_store.rs    - Database-backed session store
//! ├── identity.rs     - Identity resolution
//! ├── cookies.rs      - Session cookie helpers
//! ├── users.rs        - User model and queries
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (salted, configurable cost)
//! - Session tokens are 256-bit random values, opaque to the client
//! - The cookie is HttpOnly and SameSite=Lax
//! - Invalid credentials return one generic 401 (no user enumeration)

/// Password hashing
pub mod password;

/// Session store contract and token types
pub mod sessions;

/// In-memory session store
pub mod memory_store;

/// SQL session store
pub mod sql_store;

/// Identity resolution
pub mod identity;

/// Session cookie helpers
pub mod cookies;

/// User data model and database operations
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, profile_page, profile_update, register};
pub use memory_store::MemorySessionStore;
pub use password::{AuthError, BcryptHasher, PasswordHasher};
pub use sessions::{SessionRecord, SessionStore, SessionToken, StoreError, USER_KEY};
pub use sql_store::SqlSessionStore;
pub use users::User;
