//! Server Module
//!
//! This module contains the server-side code for initializing and
//! configuring the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and the database pool
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig, database connection, migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, TOML file, environment
//! 2. **Database**: SQLite pool plus embedded migrations
//! 3. **State Creation**: session store, password hasher, cookie settings
//! 4. **Background Tasks**: expired-session purge when a TTL is set
//! 5. **Router Creation**: public and protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use fanpub::backend::server::{create_app, ServerConfig};
//!
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig, SessionBackend};
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
