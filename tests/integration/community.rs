//! Articles, pubs, discussions and follows through the HTTP surface

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{body_json, TestApp};
use crate::{assert_redirect, assert_status};

async fn post_article(app: &TestApp, token: &str, title: &str, body: &str) -> i64 {
    let response = app
        .post(
            "/article/create",
            &[("title", title), ("body", body)],
            Some(token),
        )
        .await;
    assert_redirect!(response, "/articles");

    let listing = body_json(app.get("/articles", Some(token)).await).await;
    listing["articles"][0]["id"].as_i64().unwrap()
}

async fn open_pub(app: &TestApp, token: &str, pub_id: &str, name: &str) {
    let response = app
        .post(
            "/new_community",
            &[
                ("community_id", pub_id),
                ("community_name", name),
                ("community_comment", "Match-day chat"),
            ],
            Some(token),
        )
        .await;
    assert_redirect!(response, "/community");
}

fn titles(listing: &Value) -> Vec<&str> {
    listing["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|article| article["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_article_lifecycle() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    let bob = app.register("bob", "secret123").await;

    let id = post_article(&app, &alice, "North London derby", "What a match").await;

    let response = app
        .post(
            &format!("/article/{id}/comment"),
            &[("body", "Agreed")],
            Some(&bob),
        )
        .await;
    assert_redirect!(response, format!("/article/{id}").as_str());

    let detail = body_json(app.get(&format!("/article/{id}"), Some(&bob)).await).await;
    assert_eq!(detail["article"]["title"], "North London derby");
    assert_eq!(detail["article"]["username"], "alice");
    assert_eq!(detail["is_author"], false);
    assert_eq!(detail["comments"][0]["body"], "Agreed");
    assert_eq!(detail["comments"][0]["username"], "bob");

    let response = app
        .post(
            &format!("/article/{id}/update"),
            &[("title", "Derby day"), ("body", "Edited")],
            Some(&alice),
        )
        .await;
    assert_redirect!(response, format!("/article/{id}").as_str());

    let detail = body_json(app.get(&format!("/article/{id}"), Some(&alice)).await).await;
    assert_eq!(detail["article"]["title"], "Derby day");
    assert_eq!(detail["is_author"], true);

    let response = app
        .post(&format!("/article/{id}/delete"), &[], Some(&alice))
        .await;
    assert_redirect!(response, "/articles");
    assert_status!(
        app.get(&format!("/article/{id}"), Some(&alice)).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_only_the_author_may_modify() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    let bob = app.register("bob", "secret123").await;
    let id = post_article(&app, &alice, "Mine", "Hands off").await;

    let update = app
        .post(
            &format!("/article/{id}/update"),
            &[("title", "Hijacked"), ("body", "x")],
            Some(&bob),
        )
        .await;
    assert_status!(update, StatusCode::FORBIDDEN);

    let delete = app
        .post(&format!("/article/{id}/delete"), &[], Some(&bob))
        .await;
    assert_status!(delete, StatusCode::FORBIDDEN);

    let detail = body_json(app.get(&format!("/article/{id}"), Some(&alice)).await).await;
    assert_eq!(detail["article"]["title"], "Mine");
}

#[tokio::test]
async fn test_article_validation_and_missing_rows() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;

    let empty_title = app
        .post("/article/create", &[("title", "  "), ("body", "b")], Some(&alice))
        .await;
    assert_status!(empty_title, StatusCode::BAD_REQUEST);

    let comment = app
        .post("/article/999/comment", &[("body", "hello")], Some(&alice))
        .await;
    assert_status!(comment, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_article_search() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    post_article(&app, &alice, "Derby preview", "Team news").await;
    post_article(&app, &alice, "Transfer rumours", "A derby hero returns").await;

    let listing = body_json(app.get("/articles", Some(&alice)).await).await;
    assert_eq!(titles(&listing), vec!["Transfer rumours", "Derby preview"]);

    let by_title = body_json(
        app.get("/articles?keyword=derby&search_by=title", Some(&alice))
            .await,
    )
    .await;
    assert_eq!(titles(&by_title), vec!["Derby preview"]);

    let by_body = body_json(
        app.get("/articles?keyword=derby&search_by=body", Some(&alice))
            .await,
    )
    .await;
    assert_eq!(titles(&by_body), vec!["Transfer rumours"]);
}

#[tokio::test]
async fn test_pub_creation_and_duplicates() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    open_pub(&app, &alice, "gooners", "Gooners Arms").await;

    let duplicate = app
        .post(
            "/new_community",
            &[
                ("community_id", "gooners"),
                ("community_name", "Another"),
                ("community_comment", "x"),
            ],
            Some(&alice),
        )
        .await;
    assert_status!(duplicate, StatusCode::CONFLICT);

    let bad_id = app
        .post(
            "/new_community",
            &[
                ("community_id", "no spaces"),
                ("community_name", "Bad"),
                ("community_comment", "x"),
            ],
            Some(&alice),
        )
        .await;
    assert_status!(bad_id, StatusCode::BAD_REQUEST);

    let detail = body_json(app.get("/pub/gooners", Some(&alice)).await).await;
    assert_eq!(detail["pub"]["pub_name"], "Gooners Arms");
    assert_eq!(detail["pub"]["created_by"], "alice");
    assert_eq!(detail["follower_count"], 0);

    assert_status!(
        app.get("/pub/nowhere", Some(&alice)).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_community_search() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    open_pub(&app, &alice, "gooners", "Gooners Arms").await;
    open_pub(&app, &alice, "toffees", "Toffee Shop").await;

    let pubs = body_json(
        app.get("/community?keyword=Gooners&search_from=Pubs", Some(&alice))
            .await,
    )
    .await;
    assert_eq!(pubs["search_from"], "Pubs");
    assert_eq!(pubs["results"].as_array().unwrap().len(), 1);
    assert_eq!(pubs["results"][0]["pub_id"], "gooners");

    let users = body_json(
        app.post(
            "/community",
            &[("keyword", "ali"), ("search_from", "Users")],
            Some(&alice),
        )
        .await,
    )
    .await;
    assert_eq!(users["search_from"], "Users");
    assert_eq!(users["results"][0]["username"], "alice");
    assert!(users["results"][0].get("password_hash").is_none());

    let rooms = app
        .get("/community?keyword=x&search_from=Rooms", Some(&alice))
        .await;
    assert_status!(rooms, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_discussions_in_a_pub() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    let bob = app.register("bob", "secret123").await;
    open_pub(&app, &alice, "gooners", "Gooners Arms").await;

    let response = app
        .post(
            "/pub/gooners/discussion",
            &[("title", "Best XI"), ("body", "Pick your team")],
            Some(&bob),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("/discussion/"));

    let response = app
        .post(
            &format!("{location}/comment"),
            &[("body", "Saka on the right")],
            Some(&alice),
        )
        .await;
    assert_redirect!(response, location.as_str());

    let detail = body_json(app.get(&location, Some(&alice)).await).await;
    assert_eq!(detail["discussion"]["title"], "Best XI");
    assert_eq!(detail["discussion"]["status"], "open");
    assert_eq!(detail["comments"][0]["body"], "Saka on the right");

    let pub_page = body_json(
        app.get("/pub/gooners?keyword=XI&search_by=title", Some(&alice))
            .await,
    )
    .await;
    assert_eq!(pub_page["discussions"].as_array().unwrap().len(), 1);

    let missing = app
        .post(
            "/pub/nowhere/discussion",
            &[("title", "t"), ("body", "b")],
            Some(&alice),
        )
        .await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pub_follows() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    let bob = app.register("bob", "secret123").await;
    open_pub(&app, &alice, "gooners", "Gooners Arms").await;

    let response = app.post("/pub/gooners/follow", &[], Some(&bob)).await;
    assert_redirect!(response, "/pub/gooners");
    // Following twice is a no-op
    app.post("/pub/gooners/follow", &[], Some(&bob)).await;

    let detail = body_json(app.get("/pub/gooners", Some(&bob)).await).await;
    assert_eq!(detail["follower_count"], 1);
    assert_eq!(detail["is_following"], true);

    let bobs = body_json(app.get("/see_community", Some(&bob)).await).await;
    assert_eq!(bobs["following"][0]["pub_id"], "gooners");
    assert_eq!(bobs["created"].as_array().unwrap().len(), 0);

    let alices = body_json(app.get("/see_community", Some(&alice)).await).await;
    assert_eq!(alices["created"][0]["pub_id"], "gooners");

    app.post("/pub/gooners/unfollow", &[], Some(&bob)).await;
    let detail = body_json(app.get("/pub/gooners", Some(&bob)).await).await;
    assert_eq!(detail["follower_count"], 0);
    assert_eq!(detail["is_following"], false);
}

#[tokio::test]
async fn test_member_follows() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "secret123").await;
    let bob = app.register("bob", "secret123").await;

    let response = app.post("/users/alice/follow", &[], Some(&bob)).await;
    assert_redirect!(response, "/users/alice");

    let profile = body_json(app.get("/users/alice", Some(&bob)).await).await;
    assert_eq!(profile["user"]["username"], "alice");
    assert_eq!(profile["follower_count"], 1);
    assert_eq!(profile["is_following"], true);

    let followers = body_json(app.get("/users/alice/followers", Some(&alice)).await).await;
    assert_eq!(followers[0]["username"], "bob");
    let followings = body_json(app.get("/users/bob/followings", Some(&alice)).await).await;
    assert_eq!(followings[0]["username"], "alice");

    let self_follow = app.post("/users/alice/follow", &[], Some(&alice)).await;
    assert_status!(self_follow, StatusCode::BAD_REQUEST);

    let unknown = app.post("/users/nobody/follow", &[], Some(&alice)).await;
    assert_status!(unknown, StatusCode::NOT_FOUND);

    app.post("/users/alice/unfollow", &[], Some(&bob)).await;
    let profile = body_json(app.get("/users/alice", Some(&bob)).await).await;
    assert_eq!(profile["follower_count"], 0);
    assert_eq!(profile["is_following"], false);
}
