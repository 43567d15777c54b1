//! Authentication Handlers Module
//!
//! HTTP handlers for login, registration, logout and the member's own
//! profile.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Form and response types
//! ├── signup.rs   - POST /register
//! ├── login.rs    - POST /login
//! ├── logout.rs   - GET /logout
//! ├── me.rs       - GET /me
//! └── profile.rs  - GET/POST /profile_update
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: form → member created → session opened → cookie set
//! 2. **Login**: form → credentials verified → session opened → cookie set
//! 3. **Logout**: session destroyed → cookie removed
//!
//! Login and registration are the only places a session is created.

/// Form and response types
pub mod types;

/// Registration handler
pub mod signup;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

/// Profile handlers
pub mod profile;

pub use types::{LoginForm, RegisterForm, UserResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use profile::{profile_page, profile_update};
pub use signup::register;
