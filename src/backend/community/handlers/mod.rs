//! Community HTTP Handlers
//!
//! Every handler here runs behind the login gate and reads the viewer from
//! the `CurrentUser` extractor. Writes answer with a `302` to the page that
//! shows the result; reads answer with JSON.

/// Articles and article comments
pub mod articles;

/// Member pages and user follows
pub mod members;

/// Pubs, discussions and pub follows
pub mod pubs;
