//! End-to-end tests against the full router

pub mod auth_flow;
pub mod auth_gate;
pub mod community;
