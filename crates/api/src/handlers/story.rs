//! Handlers for the `/stories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::error::CoreError;
use storydesk_core::story::{normalize_tags, validate_progress, validate_status};
use storydesk_core::types::DbId;
use storydesk_core::validation::{require_text, require_text_if_present};
use storydesk_db::models::story::{CreateStory, Story, StoryDetail, StorySummary, UpdateStory};
use storydesk_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Check the optional status/progress/tags shared by create and update.
fn validate_common(
    status: Option<&str>,
    progress: Option<i32>,
    tags: Option<&[String]>,
) -> Result<Option<Vec<String>>, String> {
    if let Some(status) = status {
        validate_status(status)?;
    }
    if let Some(progress) = progress {
        validate_progress(progress)?;
    }
    tags.map(normalize_tags).transpose()
}

/// POST /api/stories
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateStory>,
) -> AppResult<(StatusCode, Json<Story>)> {
    input.title = require_text("Title", &input.title).map_err(AppError::BadRequest)?;
    input.tags = validate_common(input.status.as_deref(), input.progress, input.tags.as_deref())
        .map_err(AppError::BadRequest)?;

    let story = StoryRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(story_id = story.id, user_id = auth.user_id, "Story created");
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/stories
///
/// Every story of the caller with child counts, most recently updated first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<StorySummary>>> {
    let stories = StoryRepo::list_with_counts(&state.pool, auth.user_id).await?;
    Ok(Json(stories))
}

/// GET /api/stories/{id}
///
/// The story with its contacts, research, articles, meetings and transcripts.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StoryDetail>> {
    let detail = StoryRepo::find_detail(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", id)))?;
    Ok(Json(detail))
}

/// PUT /api/stories/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateStory>,
) -> AppResult<Json<Story>> {
    input.title =
        require_text_if_present("Title", input.title.as_deref()).map_err(AppError::BadRequest)?;
    input.tags = validate_common(input.status.as_deref(), input.progress, input.tags.as_deref())
        .map_err(AppError::BadRequest)?;

    let story = StoryRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", id)))?;
    Ok(Json(story))
}

/// DELETE /api/stories/{id}
///
/// Cascades to the story's articles, meetings, transcripts, research and
/// contact links.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StoryRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(story_id = id, user_id = auth.user_id, "Story deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Story", id)))
    }
}
