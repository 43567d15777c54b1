/**
 * Article Handlers
 *
 * Listing, posting, commenting on, editing and deleting articles. Only the
 * author may edit or delete an article.
 */

use axum::{
    extract::{Form, Path, Query, State},
    response::{Json, Response},
};
use sqlx::SqlitePool;

use crate::backend::community::db;
use crate::backend::community::models::{
    Article, ArticleDetail, ArticleForm, ArticleList, ArticleQuery, CommentForm,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{found, CurrentUser};
use crate::shared::validate_text;
use crate::shared::validation::MAX_TITLE_LEN;

/// Upper bound for article and comment bodies
pub const MAX_BODY_LEN: usize = 20_000;

/// GET /articles
///
/// The most recent articles, or those matching `keyword` in the column
/// named by `search_by` (title, body or author).
pub async fn list_articles(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ArticleList>, BackendError> {
    let articles = match query.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(keyword) => {
            db::search_articles(&pool, query.search_by, keyword, db::ARTICLE_LIMIT).await?
        }
        None => db::fetch_recent_articles(&pool, db::ARTICLE_LIMIT).await?,
    };

    Ok(Json(ArticleList {
        viewer: username,
        articles,
    }))
}

/// POST /article/create
pub async fn create_article(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Form(form): Form<ArticleForm>,
) -> Result<Response, BackendError> {
    validate_text("title", &form.title, MAX_TITLE_LEN)?;
    validate_text("body", &form.body, MAX_BODY_LEN)?;

    let id = db::create_article(&pool, &username, form.title.trim(), &form.body).await?;
    tracing::info!("Article {} posted by {}", id, username);

    Ok(found("/articles"))
}

/// GET /article/{id}
pub async fn article_detail(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ArticleDetail>, BackendError> {
    let article = load_article(&pool, id).await?;
    let comments = db::fetch_comments(&pool, id).await?;
    let is_author = article.username == username;

    Ok(Json(ArticleDetail {
        article,
        comments,
        is_author,
    }))
}

/// POST /article/{id}/comment
pub async fn post_comment(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, BackendError> {
    validate_text("body", &form.body, MAX_BODY_LEN)?;
    load_article(&pool, id).await?;

    db::create_comment(&pool, id, &username, &form.body).await?;
    Ok(found(&format!("/article/{id}")))
}

/// POST /article/{id}/update
pub async fn update_article(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<ArticleForm>,
) -> Result<Response, BackendError> {
    validate_text("title", &form.title, MAX_TITLE_LEN)?;
    validate_text("body", &form.body, MAX_BODY_LEN)?;
    ensure_author(&load_article(&pool, id).await?, &username)?;

    db::update_article(&pool, id, form.title.trim(), &form.body).await?;
    tracing::info!("Article {} edited by {}", id, username);

    Ok(found(&format!("/article/{id}")))
}

/// POST /article/{id}/delete
pub async fn delete_article(
    State(pool): State<SqlitePool>,
    CurrentUser { username }: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, BackendError> {
    ensure_author(&load_article(&pool, id).await?, &username)?;

    db::delete_article(&pool, id).await?;
    tracing::info!("Article {} deleted by {}", id, username);

    Ok(found("/articles"))
}

async fn load_article(pool: &SqlitePool, id: i64) -> Result<Article, BackendError> {
    db::fetch_article(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Article not found"))
}

fn ensure_author(article: &Article, username: &str) -> Result<(), BackendError> {
    if article.username == username {
        Ok(())
    } else {
        tracing::warn!("{} tried to modify article {} by {}", username, article.id, article.username);
        Err(BackendError::forbidden("Only the author can modify this article"))
    }
}
