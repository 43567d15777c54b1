/**
 * Community Database Operations
 *
 * Queries for articles, comments, pubs, discussions and follow relations.
 * Reads that join `users` pick up the author's current nickname.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::community::models::{
    Article, ArticleSearchField, Comment, Discussion, DiscussionComment, DiscussionSearchField,
    FollowEntry, Pub,
};

/// Most articles returned by one listing
pub const ARTICLE_LIMIT: i64 = 200;

/// Most discussions returned by one pub listing
pub const DISCUSSION_LIMIT: i64 = 500;

const ARTICLE_SELECT: &str = "SELECT a.id, a.username, u.nickname, a.title, a.body, \
     a.created_at, a.updated_at FROM articles a JOIN users u ON u.username = a.username";

const DISCUSSION_SELECT: &str = "SELECT d.id, d.pub_id, d.username, u.nickname, d.status, \
     d.title, d.body, d.created_at FROM discussions d JOIN users u ON u.username = d.username";

fn like_pattern(keyword: &str) -> String {
    format!("%{}%", keyword.trim())
}

// Articles

pub async fn fetch_recent_articles(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "{ARTICLE_SELECT} ORDER BY a.created_at DESC, a.id DESC LIMIT ?1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Articles whose `field` contains `keyword`, newest first
pub async fn search_articles(
    pool: &SqlitePool,
    field: ArticleSearchField,
    keyword: &str,
    limit: i64,
) -> Result<Vec<Article>, sqlx::Error> {
    let column = match field {
        ArticleSearchField::Title => "a.title",
        ArticleSearchField::Body => "a.body",
        ArticleSearchField::Author => "u.nickname",
    };

    sqlx::query_as::<_, Article>(&format!(
        "{ARTICLE_SELECT} WHERE {column} LIKE ?1 ORDER BY a.created_at DESC, a.id DESC LIMIT ?2"
    ))
    .bind(like_pattern(keyword))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn fetch_article(pool: &SqlitePool, id: i64) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!("{ARTICLE_SELECT} WHERE a.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_articles_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "{ARTICLE_SELECT} WHERE a.username = ?1 ORDER BY a.created_at DESC, a.id DESC"
    ))
    .bind(username)
    .fetch_all(pool)
    .await
}

/// Insert an article and return its id
pub async fn create_article(
    pool: &SqlitePool,
    username: &str,
    title: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO articles (username, title, body, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(username)
    .bind(title)
    .bind(body)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Returns `false` if the article does not exist
pub async fn update_article(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    body: &str,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE articles SET title = ?1, body = ?2, updated_at = ?3 WHERE id = ?4")
            .bind(title)
            .bind(body)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete an article and, through the foreign key, its comments
pub async fn delete_article(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_comments(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT c.id, c.article_id, c.username, u.nickname, c.body, c.created_at \
         FROM comments c JOIN users u ON u.username = c.username \
         WHERE c.article_id = ?1 ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}

pub async fn create_comment(
    pool: &SqlitePool,
    article_id: i64,
    username: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO comments (article_id, username, body, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(article_id)
    .bind(username)
    .bind(body)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

// Pubs

pub async fn fetch_pub(pool: &SqlitePool, pub_id: &str) -> Result<Option<Pub>, sqlx::Error> {
    sqlx::query_as::<_, Pub>(
        "SELECT pub_id, pub_name, pub_comment, created_by, created_at FROM pubs WHERE pub_id = ?1",
    )
    .bind(pub_id)
    .fetch_optional(pool)
    .await
}

/// Insert a pub
///
/// An existing `pub_id` surfaces as a unique-constraint `sqlx::Error`.
pub async fn create_pub(
    pool: &SqlitePool,
    pub_id: &str,
    pub_name: &str,
    pub_comment: &str,
    created_by: &str,
) -> Result<Pub, sqlx::Error> {
    sqlx::query_as::<_, Pub>(
        "INSERT INTO pubs (pub_id, pub_name, pub_comment, created_by, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         RETURNING pub_id, pub_name, pub_comment, created_by, created_at",
    )
    .bind(pub_id)
    .bind(pub_name)
    .bind(pub_comment)
    .bind(created_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Pubs whose name or description contains `keyword`
pub async fn search_pubs(
    pool: &SqlitePool,
    keyword: &str,
    limit: i64,
) -> Result<Vec<Pub>, sqlx::Error> {
    sqlx::query_as::<_, Pub>(
        "SELECT pub_id, pub_name, pub_comment, created_by, created_at FROM pubs \
         WHERE pub_comment LIKE ?1 OR pub_name LIKE ?1 \
         ORDER BY created_at DESC LIMIT ?2",
    )
    .bind(like_pattern(keyword))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn fetch_pubs_created_by(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<Pub>, sqlx::Error> {
    sqlx::query_as::<_, Pub>(
        "SELECT pub_id, pub_name, pub_comment, created_by, created_at FROM pubs \
         WHERE created_by = ?1 ORDER BY created_at DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

// Discussions

/// Discussions in a pub, newest first, optionally filtered by keyword
pub async fn fetch_discussions(
    pool: &SqlitePool,
    pub_id: &str,
    filter: Option<(DiscussionSearchField, &str)>,
) -> Result<Vec<Discussion>, sqlx::Error> {
    match filter {
        None => {
            sqlx::query_as::<_, Discussion>(&format!(
                "{DISCUSSION_SELECT} WHERE d.pub_id = ?1 \
                 ORDER BY d.created_at DESC, d.id DESC LIMIT ?2"
            ))
            .bind(pub_id)
            .bind(DISCUSSION_LIMIT)
            .fetch_all(pool)
            .await
        }
        Some((field, keyword)) => {
            let column = match field {
                DiscussionSearchField::Title => "d.title",
                DiscussionSearchField::Body => "d.body",
                DiscussionSearchField::Author => "u.nickname",
            };
            sqlx::query_as::<_, Discussion>(&format!(
                "{DISCUSSION_SELECT} WHERE d.pub_id = ?1 AND {column} LIKE ?2 \
                 ORDER BY d.created_at DESC, d.id DESC LIMIT ?3"
            ))
            .bind(pub_id)
            .bind(like_pattern(keyword))
            .bind(DISCUSSION_LIMIT)
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn fetch_discussion(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Discussion>, sqlx::Error> {
    sqlx::query_as::<_, Discussion>(&format!("{DISCUSSION_SELECT} WHERE d.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_discussion(
    pool: &SqlitePool,
    pub_id: &str,
    username: &str,
    status: &str,
    title: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO discussions (pub_id, username, status, title, body, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(pub_id)
    .bind(username)
    .bind(status)
    .bind(title)
    .bind(body)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Comments on a discussion in posting order
pub async fn fetch_discussion_comments(
    pool: &SqlitePool,
    discussion_id: i64,
) -> Result<Vec<DiscussionComment>, sqlx::Error> {
    sqlx::query_as::<_, DiscussionComment>(
        "SELECT c.id, c.discussion_id, c.username, u.nickname, c.body, c.created_at \
         FROM discussion_comments c JOIN users u ON u.username = c.username \
         WHERE c.discussion_id = ?1 ORDER BY c.created_at, c.id",
    )
    .bind(discussion_id)
    .fetch_all(pool)
    .await
}

pub async fn create_discussion_comment(
    pool: &SqlitePool,
    discussion_id: i64,
    username: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO discussion_comments (discussion_id, username, body, created_at) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(discussion_id)
    .bind(username)
    .bind(body)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

// Follows

/// Record that `from_user` follows `to_user`; `false` if already following
pub async fn follow_user(
    pool: &SqlitePool,
    from_user: &str,
    to_user: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO follows (from_user, to_user, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(from_user)
    .bind(to_user)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn unfollow_user(
    pool: &SqlitePool,
    from_user: &str,
    to_user: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE from_user = ?1 AND to_user = ?2")
        .bind(from_user)
        .bind(to_user)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_following(
    pool: &SqlitePool,
    from_user: &str,
    to_user: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM follows WHERE from_user = ?1 AND to_user = ?2")
            .bind(from_user)
            .bind(to_user)
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

/// Members following `username`
pub async fn fetch_followers(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<FollowEntry>, sqlx::Error> {
    sqlx::query_as::<_, FollowEntry>(
        "SELECT f.from_user AS username, u.nickname, f.created_at AS followed_at \
         FROM follows f JOIN users u ON u.username = f.from_user \
         WHERE f.to_user = ?1 ORDER BY f.created_at DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

/// Members `username` follows
pub async fn fetch_followings(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<FollowEntry>, sqlx::Error> {
    sqlx::query_as::<_, FollowEntry>(
        "SELECT f.to_user AS username, u.nickname, f.created_at AS followed_at \
         FROM follows f JOIN users u ON u.username = f.to_user \
         WHERE f.from_user = ?1 ORDER BY f.created_at DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

pub async fn follow_pub(
    pool: &SqlitePool,
    username: &str,
    pub_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO pub_follows (username, pub_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(username)
    .bind(pub_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn unfollow_pub(
    pool: &SqlitePool,
    username: &str,
    pub_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pub_follows WHERE username = ?1 AND pub_id = ?2")
        .bind(username)
        .bind(pub_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_following_pub(
    pool: &SqlitePool,
    username: &str,
    pub_id: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM pub_follows WHERE username = ?1 AND pub_id = ?2")
            .bind(username)
            .bind(pub_id)
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

pub async fn count_pub_followers(pool: &SqlitePool, pub_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM pub_follows WHERE pub_id = ?1")
        .bind(pub_id)
        .fetch_one(pool)
        .await
}

/// Pubs `username` follows
pub async fn fetch_followed_pubs(
    pool: &SqlitePool,
    username: &str,
) -> Result<Vec<Pub>, sqlx::Error> {
    sqlx::query_as::<_, Pub>(
        "SELECT p.pub_id, p.pub_name, p.pub_comment, p.created_by, p.created_at \
         FROM pub_follows f JOIN pubs p ON p.pub_id = f.pub_id \
         WHERE f.username = ?1 ORDER BY f.created_at DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}
