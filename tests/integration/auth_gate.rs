//! The login gate in front of member-only routes

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use fanpub::backend::auth::{MemorySessionStore, SqlSessionStore, USER_KEY};

use crate::common::{body_json, memory_pool, session_cookie, TestApp};
use crate::{assert_redirect, assert_status};

const PROTECTED: &[&str] = &[
    "/me",
    "/profile_update",
    "/articles",
    "/article/1",
    "/community",
    "/see_community",
    "/pub/anything",
    "/discussion/1",
    "/users/alice",
    "/users/alice/followers",
    "/users/alice/followings",
];

#[tokio::test]
async fn test_anonymous_requests_are_redirected() {
    let app = TestApp::new().await;

    for path in PROTECTED {
        let response = app.get(path, None).await;
        assert_redirect!(response, "/");
    }
}

#[tokio::test]
async fn test_anonymous_posts_are_redirected() {
    let app = TestApp::new().await;

    let response = app
        .post("/article/create", &[("title", "t"), ("body", "b")], None)
        .await;
    assert_redirect!(response, "/");

    // Nothing was written
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
        .fetch_one(&app.state.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_forged_token_is_redirected() {
    let app = TestApp::new().await;
    let response = app.get("/me", Some(&"ab".repeat(32))).await;
    assert_redirect!(response, "/");
}

#[tokio::test]
async fn test_valid_session_is_admitted() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    for path in ["/me", "/articles", "/see_community", "/users/alice"] {
        let response = app.get(path, Some(&token)).await;
        assert_status!(response, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_destroyed_session_is_redirected() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    app.state
        .sessions
        .destroy(&token.as_str().into())
        .await
        .unwrap();

    assert_redirect!(app.get("/me", Some(&token)).await, "/");
}

#[tokio::test]
async fn test_session_without_user_is_redirected() {
    let app = TestApp::new().await;
    let token = app
        .state
        .sessions
        .create("theme", json!("dark"))
        .await
        .unwrap();

    assert_redirect!(app.get("/articles", Some(token.as_str())).await, "/");
}

#[tokio::test]
async fn test_deleted_member_is_treated_as_logged_out() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    sqlx::query("DELETE FROM users WHERE username = ?1")
        .bind("alice")
        .execute(&app.state.db_pool)
        .await
        .unwrap();

    assert_redirect!(app.get("/me", Some(&token)).await, "/");
}

#[tokio::test]
async fn test_expired_session_is_redirected() {
    let store = Arc::new(MemorySessionStore::with_ttl(Duration::from_millis(100)));
    let app = TestApp::with_store(store).await;
    let token = app.register("alice", "secret123").await;

    assert_status!(app.get("/me", Some(&token)).await, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_redirect!(app.get("/me", Some(&token)).await, "/");
}

#[tokio::test]
async fn test_sql_sessions_work_end_to_end() {
    let pool = memory_pool().await;
    let store = Arc::new(SqlSessionStore::new(pool.clone()));
    let app = TestApp::with_parts(pool, store).await;

    let token = app.register("alice", "secret123").await;
    assert_status!(app.get("/me", Some(&token)).await, StatusCode::OK);

    app.get("/logout", Some(&token)).await;
    assert_redirect!(app.get("/me", Some(&token)).await, "/");
}

/// App whose session store sits on its own pool, closed once the member
/// has a live session
async fn app_with_failed_store() -> (TestApp, String) {
    let session_pool = memory_pool().await;
    let store = Arc::new(SqlSessionStore::new(session_pool.clone()));
    let app = TestApp::with_store(store).await;
    let token = app.register("alice", "secret123").await;

    session_pool.close().await;
    (app, token)
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    let (app, token) = app_with_failed_store().await;

    let response = app.get("/me", Some(&token)).await;
    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_store_failure_without_cookie_still_redirects() {
    let (app, _token) = app_with_failed_store().await;

    assert_redirect!(app.get("/me", None).await, "/");
}

#[tokio::test]
async fn test_login_fails_closed_when_store_is_down() {
    let (app, _token) = app_with_failed_store().await;

    let response = app
        .post(
            "/login",
            &[("username", "alice"), ("password", "secret123")],
            None,
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(session_cookie(&response), None);
}

#[tokio::test]
async fn test_session_snapshot_holds_username() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    let record = app
        .state
        .sessions
        .get(&token.as_str().into())
        .await
        .unwrap()
        .expect("session should exist");

    assert_eq!(record.username(), Some("alice"));
    assert!(record.get(USER_KEY).unwrap().get("password_hash").is_none());
}
