/**
 * Community Models
 *
 * Rows read from the community tables, the forms accepted by the
 * community handlers and the JSON views they return.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::handlers::types::UserResponse;

/// An article joined with its author's nickname
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub username: String,
    pub nickname: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A community ("pub")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pub {
    pub pub_id: String,
    pub pub_name: String,
    pub pub_comment: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A discussion thread inside a pub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Discussion {
    pub id: i64,
    pub pub_id: String,
    pub username: String,
    pub nickname: String,
    pub status: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiscussionComment {
    pub id: i64,
    pub discussion_id: i64,
    pub username: String,
    pub nickname: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One side of a follow relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowEntry {
    pub username: String,
    pub nickname: String,
    pub followed_at: DateTime<Utc>,
}

/// Article column searched by `GET /articles?keyword=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSearchField {
    #[default]
    Title,
    Body,
    /// Author nickname
    Author,
}

/// Discussion column searched by `GET /pub/{pub_id}?keyword=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscussionSearchField {
    #[default]
    Title,
    Body,
    Author,
}

/// What the community search looks through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SearchTarget {
    #[default]
    #[serde(alias = "pubs")]
    Pubs,
    #[serde(alias = "users")]
    Users,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub search_by: ArticleSearchField,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscussionQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub search_by: DiscussionSearchField,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommunitySearch {
    pub keyword: Option<String>,
    #[serde(default)]
    pub search_from: SearchTarget,
}

#[derive(Debug, Deserialize)]
pub struct ArticleForm {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

/// Form for `POST /new_community`
#[derive(Debug, Deserialize)]
pub struct NewPubForm {
    pub community_id: String,
    pub community_name: String,
    pub community_comment: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionForm {
    pub title: String,
    pub body: String,
    /// Free-form thread status; defaults to "open"
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleList {
    pub viewer: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    pub article: Article,
    pub comments: Vec<Comment>,
    /// Whether the viewer wrote the article
    pub is_author: bool,
}

#[derive(Debug, Serialize)]
pub struct PubDetail {
    #[serde(rename = "pub")]
    pub community: Pub,
    pub discussions: Vec<Discussion>,
    pub follower_count: i64,
    pub is_following: bool,
}

#[derive(Debug, Serialize)]
pub struct DiscussionDetail {
    pub discussion: Discussion,
    pub comments: Vec<DiscussionComment>,
}

/// Result of the community search; tagged with what was searched
#[derive(Debug, Serialize)]
#[serde(tag = "search_from", content = "results")]
pub enum SearchResults {
    Pubs(Vec<Pub>),
    Users(Vec<UserResponse>),
}

/// Pubs related to the viewer
#[derive(Debug, Serialize)]
pub struct YourCommunities {
    pub following: Vec<Pub>,
    pub created: Vec<Pub>,
}

/// Another member's public page
#[derive(Debug, Serialize)]
pub struct MemberProfile {
    pub user: UserResponse,
    pub articles: Vec<Article>,
    pub follower_count: usize,
    pub following_count: usize,
    /// Whether the viewer follows this member
    pub is_following: bool,
}
