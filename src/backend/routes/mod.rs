//! Routes Module
//!
//! HTTP route configuration for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Router assembly and layers
//! ├── public_routes.rs    - Routes reachable without a session
//! └── protected_routes.rs - Routes behind the login gate
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use fanpub::backend::routes::create_router;
//!
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// Routes reachable without a session
pub mod public_routes;

/// Routes behind the login gate
pub mod protected_routes;

pub use router::create_router;
