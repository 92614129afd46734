//! Handlers for the `/bookmarks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::bookmark::{normalize_url, validate_content};
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_db::models::bookmark::{Bookmark, CreateBookmark, UpdateBookmark};
use storydesk_db::repositories::BookmarkRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::handlers::require_story;
use crate::middleware::auth::AuthUser;
use crate::query::StoryFilter;
use crate::state::AppState;

/// POST /api/bookmarks
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateBookmark>,
) -> AppResult<(StatusCode, Json<Bookmark>)> {
    input.url = normalize_url(input.url).map_err(AppError::BadRequest)?;
    validate_content(input.url.as_deref(), input.quote.as_deref())
        .map_err(AppError::BadRequest)?;
    if let Some(story_id) = input.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }

    let bookmark = BookmarkRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(bookmark_id = bookmark.id, user_id = auth.user_id, "Bookmark created");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// GET /api/bookmarks
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<StoryFilter>,
) -> AppResult<Json<Vec<Bookmark>>> {
    if let Some(story_id) = filter.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }
    let bookmarks = BookmarkRepo::list(&state.pool, auth.user_id, filter.story_id).await?;
    Ok(Json(bookmarks))
}

/// GET /api/bookmarks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Bookmark>> {
    let bookmark = BookmarkRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Bookmark", id)))?;
    Ok(Json(bookmark))
}

/// PUT /api/bookmarks/{id}
///
/// A blank `url` clears it. Clearing both `url` and `quote` is rejected by
/// the table's check constraint and surfaces as a 400.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateBookmark>,
) -> AppResult<Json<Bookmark>> {
    if let Some(url) = input.url.take() {
        input.url = Some(normalize_url(url).map_err(AppError::BadRequest)?);
    }
    if let Some(Some(story_id)) = input.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }

    let bookmark = BookmarkRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Bookmark", id)))?;
    Ok(Json(bookmark))
}

/// DELETE /api/bookmarks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookmarkRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Bookmark", id)))
    }
}
