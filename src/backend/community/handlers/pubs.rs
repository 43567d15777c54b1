/**
 * Pub Handlers
 *
 * Community ("pub") search and creation, pub pages with their discussion
 * threads, and pub follows.
 */

use axum::{
    extract::{Form, Path, Query, State},
    response::{Json, Response},
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::{is_unique_violation, search_users};
use crate::backend::community::db;
use crate::backend::community::handlers::articles::MAX_BODY_LEN;
use crate::backend::community::models::{
    CommentForm, CommunitySearch, DiscussionDetail, DiscussionForm, DiscussionQuery, NewPubForm,
    Pub, PubDetail, SearchResults, SearchTarget, YourCommunities,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{found, CurrentUser};
use crate::shared::validation::MAX_TITLE_LEN;
use crate::shared::{validate_pub_id, validate_text};

/// Most rows returned by one community search
pub const SEARCH_LIMIT: i64 = 100;

const MAX_PUB_COMMENT_LEN: usize = 2000;
const MAX_STATUS_LEN: usize = 30;
const DEFAULT_STATUS: &str = "open";

/// GET /community
pub async fn search_community(
    State(pool): State<SqlitePool>,
    Query(search): Query<CommunitySearch>,
) -> Result<Json<SearchResults>, BackendError> {
    run_search(&pool, search).await.map(Json)
}

/// POST /community, the form variant of the search
pub async fn search_community_form(
    State(pool): State<SqlitePool>,
    Form(search): Form<CommunitySearch>,
) -> Result<Json<SearchResults>, BackendError> {
    run_search(&pool, search).await.map(Json)
}

async fn run_search(
    pool: &SqlitePool,
    search: CommunitySearch,
) -> Result<SearchResults, BackendError> {
    let keyword = search.keyword.unwrap_or_default();

    let results = match search.search_from {
        SearchTarget::Pubs => SearchResults::Pubs(db::search_pubs(pool, &keyword, SEARCH_LIMIT).await?),
        SearchTarget::Users => SearchResults::Users(
            search_users(pool, &keyword, SEARCH_LIMIT)
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect(),
        ),
    };

    Ok(results)
}

/// POST /new_community
///
/// # Errors
///
/// * `400 Bad Request` - invalid id, name or description
/// * `409 Conflict` - a pub with this id already exists
pub async fn create_pub(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Form(form): Form<NewPubForm>,
) -> Result<Response, BackendError> {
    let pub_id = form.community_id.trim();
    validate_pub_id(pub_id)?;
    validate_text("community_name", &form.community_name, MAX_TITLE_LEN)?;
    validate_text("community_comment", &form.community_comment, MAX_PUB_COMMENT_LEN)?;

    if db::fetch_pub(&pool, pub_id).await?.is_some() {
        return Err(BackendError::conflict("Community id already exists"));
    }

    match db::create_pub(
        &pool,
        pub_id,
        form.community_name.trim(),
        form.community_comment.trim(),
        &username,
    )
    .await
    {
        Ok(created) => tracing::info!("Pub {} created by {}", created.pub_id, username),
        Err(e) if is_unique_violation(&e) => {
            return Err(BackendError::conflict("Community id already exists"));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(found("/community"))
}

/// GET /pub/{pub_id}
pub async fn pub_detail(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(pub_id): Path<String>,
    Query(query): Query<DiscussionQuery>,
) -> Result<Json<PubDetail>, BackendError> {
    let community = load_pub(&pool, &pub_id).await?;

    let filter = query
        .keyword
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .map(|k| (query.search_by, k));
    let discussions = db::fetch_discussions(&pool, &pub_id, filter).await?;
    let follower_count = db::count_pub_followers(&pool, &pub_id).await?;
    let is_following = db::is_following_pub(&pool, &username, &pub_id).await?;

    Ok(Json(PubDetail {
        community,
        discussions,
        follower_count,
        is_following,
    }))
}

/// POST /pub/{pub_id}/discussion
pub async fn create_discussion(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(pub_id): Path<String>,
    Form(form): Form<DiscussionForm>,
) -> Result<Response, BackendError> {
    validate_text("title", &form.title, MAX_TITLE_LEN)?;
    validate_text("body", &form.body, MAX_BODY_LEN)?;
    let status = form
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STATUS);
    validate_text("status", status, MAX_STATUS_LEN)?;

    load_pub(&pool, &pub_id).await?;
    let id = db::create_discussion(&pool, &pub_id, &username, status, form.title.trim(), &form.body)
        .await?;
    tracing::info!("Discussion {} opened in {} by {}", id, pub_id, username);

    Ok(found(&format!("/discussion/{id}")))
}

/// GET /discussion/{id}
pub async fn discussion_detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<DiscussionDetail>, BackendError> {
    let discussion = db::fetch_discussion(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Discussion not found"))?;
    let comments = db::fetch_discussion_comments(&pool, id).await?;

    Ok(Json(DiscussionDetail {
        discussion,
        comments,
    }))
}

/// POST /discussion/{id}/comment
pub async fn discussion_comment(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, BackendError> {
    validate_text("body", &form.body, MAX_BODY_LEN)?;
    if db::fetch_discussion(&pool, id).await?.is_none() {
        return Err(BackendError::not_found("Discussion not found"));
    }

    db::create_discussion_comment(&pool, id, &username, &form.body).await?;
    Ok(found(&format!("/discussion/{id}")))
}

/// POST /pub/{pub_id}/follow
pub async fn follow_pub(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(pub_id): Path<String>,
) -> Result<Response, BackendError> {
    load_pub(&pool, &pub_id).await?;
    if db::follow_pub(&pool, &username, &pub_id).await? {
        tracing::info!("{} now follows pub {}", username, pub_id);
    }
    Ok(found(&format!("/pub/{pub_id}")))
}

/// POST /pub/{pub_id}/unfollow
pub async fn unfollow_pub(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(pub_id): Path<String>,
) -> Result<Response, BackendError> {
    db::unfollow_pub(&pool, &username, &pub_id).await?;
    Ok(found(&format!("/pub/{pub_id}")))
}

/// GET /see_community
///
/// Pubs the viewer follows and pubs the viewer created.
pub async fn your_communities(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
) -> Result<Json<YourCommunities>, BackendError> {
    let following = db::fetch_followed_pubs(&pool, &username).await?;
    let created = db::fetch_pubs_created_by(&pool, &username).await?;

    Ok(Json(YourCommunities { following, created }))
}

async fn load_pub(pool: &SqlitePool, pub_id: &str) -> Result<Pub, BackendError> {
    db::fetch_pub(pool, pub_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Community not found"))
}
