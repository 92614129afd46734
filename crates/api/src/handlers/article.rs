//! Handlers for the `/articles` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::article::{validate_status, word_count};
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_core::validation::{require_text, require_text_if_present};
use storydesk_db::models::article::{Article, CreateArticle, UpdateArticle};
use storydesk_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::handlers::{require_story, required_id};
use crate::middleware::auth::AuthUser;
use crate::query::StoryFilter;
use crate::state::AppState;

/// POST /api/articles
///
/// `wordCount` is derived from `content`.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let story_id = required_id(input.story_id, "storyId")?;
    input.title = require_text("Title", &input.title).map_err(AppError::BadRequest)?;
    if let Some(status) = &input.status {
        validate_status(status).map_err(AppError::BadRequest)?;
    }

    let words = word_count(&input.content);
    let article = ArticleRepo::create(&state.pool, story_id, auth.user_id, &input, words)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", story_id)))?;

    tracing::info!(article_id = article.id, story_id, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/articles
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<StoryFilter>,
) -> AppResult<Json<Vec<Article>>> {
    if let Some(story_id) = filter.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }
    let articles = ArticleRepo::list(&state.pool, auth.user_id, filter.story_id).await?;
    Ok(Json(articles))
}

/// GET /api/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Article", id)))?;
    Ok(Json(article))
}

/// PUT /api/articles/{id}
///
/// `wordCount` is recomputed when `content` changes.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateArticle>,
) -> AppResult<Json<Article>> {
    input.title =
        require_text_if_present("Title", input.title.as_deref()).map_err(AppError::BadRequest)?;
    if let Some(status) = &input.status {
        validate_status(status).map_err(AppError::BadRequest)?;
    }

    let words = input.content.as_deref().map(word_count);
    let article = ArticleRepo::update(&state.pool, id, auth.user_id, &input, words)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Article", id)))?;
    Ok(Json(article))
}

/// DELETE /api/articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ArticleRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Article", id)))
    }
}
