//! Registration, login, logout and profile flows

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_bytes, body_json, session_cookie, TestApp};
use crate::{assert_redirect, assert_status};

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;
    app.register("alice", "secret123").await;

    let response = app
        .post(
            "/login",
            &[("username", "alice"), ("password", "secret123")],
            None,
        )
        .await;

    assert_redirect!(response, "/articles");
    let token = session_cookie(&response).expect("login should set the session cookie");
    assert!(!token.is_empty());

    let me = app.get("/me", Some(&token)).await;
    assert_status!(me, StatusCode::OK);
    let body = body_json(me).await;
    assert_eq!(body["username"], "alice");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("alice", "secret123").await;

    let wrong_password = app
        .post(
            "/login",
            &[("username", "alice"), ("password", "wrongpass")],
            None,
        )
        .await;
    let unknown_user = app
        .post(
            "/login",
            &[("username", "bob"), ("password", "anything")],
            None,
        )
        .await;

    assert_status!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_status!(unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(session_cookie(&wrong_password), None);
    assert_eq!(session_cookie(&unknown_user), None);

    let first = body_bytes(wrong_password).await;
    let second = body_bytes(unknown_user).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_register_signs_the_member_in() {
    let app = TestApp::new().await;
    let token = app.register("carol", "secret123").await;

    let me = app.get("/me", Some(&token)).await;
    assert_status!(me, StatusCode::OK);
    let body = body_json(me).await;
    assert_eq!(body["username"], "carol");
    assert_eq!(body["nickname"], "carol");
}

#[tokio::test]
async fn test_register_redirects_home() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/register",
            &[
                ("username", "dave"),
                ("password", "secret123"),
                ("nickname", "Big Dave"),
            ],
            None,
        )
        .await;

    assert_redirect!(response, "/articles");
    let token = session_cookie(&response).unwrap();
    let body = body_json(app.get("/me", Some(&token)).await).await;
    assert_eq!(body["nickname"], "Big Dave");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    app.register("alice", "secret123").await;

    let response = app
        .post(
            "/register",
            &[("username", "alice"), ("password", "different1")],
            None,
        )
        .await;

    assert_status!(response, StatusCode::CONFLICT);
    assert_eq!(session_cookie(&response), None);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Username already taken");

    // The original password still works
    assert!(app.login("alice", "secret123").await.is_some());
    assert!(app.login("alice", "different1").await.is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new().await;

    let short_password = app
        .post("/register", &[("username", "erin"), ("password", "short")], None)
        .await;
    assert_status!(short_password, StatusCode::BAD_REQUEST);

    let bad_username = app
        .post(
            "/register",
            &[("username", "9lives"), ("password", "secret123")],
            None,
        )
        .await;
    assert_status!(bad_username, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    let response = app.get("/logout", Some(&token)).await;
    assert_redirect!(response, "/");
    assert_eq!(session_cookie(&response).as_deref(), Some(""));

    let me = app.get("/me", Some(&token)).await;
    assert_redirect!(me, "/");
}

#[tokio::test]
async fn test_logout_without_session_is_harmless() {
    let app = TestApp::new().await;

    let response = app.get("/logout", None).await;
    assert_redirect!(response, "/");

    let response = app.get("/logout", Some("not-a-real-token")).await;
    assert_redirect!(response, "/");
}

#[tokio::test]
async fn test_login_rotates_the_previous_session() {
    let app = TestApp::new().await;
    let first = app.register("alice", "secret123").await;

    let response = app
        .post(
            "/login",
            &[("username", "alice"), ("password", "secret123")],
            Some(&first),
        )
        .await;
    let second = session_cookie(&response).unwrap();

    assert_ne!(first, second);
    assert_redirect!(app.get("/me", Some(&first)).await, "/");
    assert_status!(app.get("/me", Some(&second)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_each_login_gets_its_own_session() {
    let app = TestApp::new().await;
    let from_register = app.register("alice", "secret123").await;
    let from_login = app.login("alice", "secret123").await.unwrap();

    assert_ne!(from_register, from_login);

    // Logging out one browser leaves the other signed in
    app.get("/logout", Some(&from_login)).await;
    assert_status!(app.get("/me", Some(&from_register)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_update_is_visible_immediately() {
    let app = TestApp::new().await;
    let token = app.register("alice", "secret123").await;

    let response = app
        .post(
            "/profile_update",
            &[
                ("nickname", "Ali"),
                ("your_club", "Arsenal"),
                ("your_nation", "England"),
            ],
            Some(&token),
        )
        .await;
    assert_redirect!(response, "/articles");

    let page = body_json(app.get("/profile_update", Some(&token)).await).await;
    assert_eq!(page["nickname"], "Ali");
    assert_eq!(page["your_club"], "Arsenal");

    let listing = body_json(app.get("/articles", Some(&token)).await).await;
    assert_eq!(listing["viewer"], "alice");
}

#[tokio::test]
async fn test_public_routes_need_no_session() {
    let app = TestApp::new().await;

    assert_status!(app.get("/", None).await, StatusCode::OK);
    let health = body_json(app.get("/health", None).await).await;
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.get("/no/such/page", None).await;

    assert_status!(response, StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
}
