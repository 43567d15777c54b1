//! Community Module
//!
//! The fan-facing features built on top of authentication: articles with
//! comments, pubs (communities) with discussion threads, and follows
//! between members and from members to pubs.
//!
//! # Module Structure
//!
//! ```text
//! community/
//! ├── mod.rs       - Module exports and documentation
//! ├── models.rs    - Rows, forms and JSON views
//! ├── db.rs        - SQL queries
//! └── handlers/    - HTTP handlers
//!     ├── articles.rs
//!     ├── members.rs
//!     └── pubs.rs
//! ```

/// Rows, forms and response types
pub mod models;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;
