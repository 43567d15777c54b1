/**
 * Protected Routes
 *
 * Every route added here sits behind `require_login`. The caller applies
 * the gate once to the whole group with `route_layer`, so a route cannot
 * be added here without it.
 *
 * ## Account
 * - `GET /me`
 * - `GET|POST /profile_update`
 *
 * ## Members
 * - `GET /users/{username}`, `/followers`, `/followings`
 * - `POST /users/{username}/follow`, `/unfollow`
 *
 * ## Articles
 * - `GET /articles`, `POST /article/create`
 * - `GET /article/{id}`
 * - `POST /article/{id}/comment`, `/update`, `/delete`
 *
 * ## Pubs
 * - `GET|POST /community`, `POST /new_community`, `GET /see_community`
 * - `GET /pub/{pub_id}`, `POST /pub/{pub_id}/discussion`
 * - `POST /pub/{pub_id}/follow`, `/unfollow`
 * - `GET /discussion/{id}`, `POST /discussion/{id}/comment`
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, profile_page, profile_update};
use crate::backend::community::handlers::{articles, members, pubs};
use crate::backend::server::state::AppState;

/// Configure account routes
pub fn configure_account_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/me", get(get_me))
        .route("/profile_update", get(profile_page).post(profile_update))
}

/// Configure member, article and pub routes
pub fn configure_community_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Members
        .route("/users/{username}", get(members::member_profile))
        .route("/users/{username}/follow", post(members::follow))
        .route("/users/{username}/unfollow", post(members::unfollow))
        .route("/users/{username}/followers", get(members::followers))
        .route("/users/{username}/followings", get(members::followings))
        // Articles
        .route("/articles", get(articles::list_articles))
        .route("/article/create", post(articles::create_article))
        .route("/article/{id}", get(articles::article_detail))
        .route("/article/{id}/comment", post(articles::post_comment))
        .route("/article/{id}/update", post(articles::update_article))
        .route("/article/{id}/delete", post(articles::delete_article))
        // Pubs
        .route(
            "/community",
            get(pubs::search_community).post(pubs::search_community_form),
        )
        .route("/new_community", post(pubs::create_pub))
        .route("/see_community", get(pubs::your_communities))
        .route("/pub/{pub_id}", get(pubs::pub_detail))
        .route("/pub/{pub_id}/discussion", post(pubs::create_discussion))
        .route("/pub/{pub_id}/follow", post(pubs::follow_pub))
        .route("/pub/{pub_id}/unfollow", post(pubs::unfollow_pub))
        .route("/discussion/{id}", get(pubs::discussion_detail))
        .route("/discussion/{id}/comment", post(pubs::discussion_comment))
}
