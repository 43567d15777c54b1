//! Property-based tests

#[cfg(feature = "ssr")]
pub mod token_proptest;
