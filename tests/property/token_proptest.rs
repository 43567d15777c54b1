//! Property-based tests for session tokens and records

use proptest::prelude::*;
use serde_json::json;

use fanpub::backend::auth::sessions::TOKEN_BYTES;
use fanpub::backend::auth::{SessionRecord, SessionToken, USER_KEY};

proptest! {
    #[test]
    fn test_generated_tokens_are_lowercase_hex(_ in 0..64u32) {
        let token = SessionToken::generate();
        prop_assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        prop_assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generated_tokens_do_not_repeat(_ in 0..64u32) {
        let first = SessionToken::generate();
        let second = SessionToken::generate();
        prop_assert_ne!(first, second);
    }

    #[test]
    fn test_token_debug_never_shows_the_value(value in "[0-9a-f]{8,64}") {
        let token = SessionToken::from(value.as_str());
        let shown = format!("{:?}", token);
        prop_assert!(!shown.contains(&value));
        prop_assert_eq!(token.as_str(), value.as_str());
    }

    #[test]
    fn test_record_username_reads_the_user_attribute(username in "[a-z][a-z0-9_]{2,29}") {
        let record = SessionRecord::with(USER_KEY, json!({ "username": username.clone() }));
        prop_assert_eq!(record.username(), Some(username.as_str()));
    }

    #[test]
    fn test_record_without_user_has_no_username(key in "[a-z]{1,10}") {
        prop_assume!(key != USER_KEY);
        let record = SessionRecord::with(key, json!({ "username": "alice" }));
        prop_assert_eq!(record.username(), None);
    }
}
