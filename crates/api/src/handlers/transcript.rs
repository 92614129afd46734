//! Handlers for the `/transcripts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_core::validation::{require_text, require_text_if_present};
use storydesk_db::models::transcript::{CreateTranscript, Transcript, UpdateTranscript};
use storydesk_db::repositories::TranscriptRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::handlers::{require_meeting, require_story, required_id};
use crate::middleware::auth::AuthUser;
use crate::query::StoryFilter;
use crate::state::AppState;

fn validate_duration(minutes: Option<i32>) -> AppResult<()> {
    match minutes {
        Some(m) if m < 0 => Err(AppError::BadRequest(
            "durationMinutes cannot be negative".into(),
        )),
        _ => Ok(()),
    }
}

/// POST /api/transcripts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateTranscript>,
) -> AppResult<(StatusCode, Json<Transcript>)> {
    let story_id = required_id(input.story_id, "storyId")?;
    input.title = require_text("Title", &input.title).map_err(AppError::BadRequest)?;
    validate_duration(input.duration_minutes)?;
    if let Some(meeting_id) = input.meeting_id {
        require_meeting(&state.pool, meeting_id, story_id, auth.user_id).await?;
    }

    let transcript = TranscriptRepo::create(&state.pool, story_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", story_id)))?;

    tracing::info!(transcript_id = transcript.id, story_id, "Transcript created");
    Ok((StatusCode::CREATED, Json(transcript)))
}

/// GET /api/transcripts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<StoryFilter>,
) -> AppResult<Json<Vec<Transcript>>> {
    if let Some(story_id) = filter.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }
    let transcripts = TranscriptRepo::list(&state.pool, auth.user_id, filter.story_id).await?;
    Ok(Json(transcripts))
}

/// GET /api/transcripts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Transcript>> {
    let transcript = TranscriptRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Transcript", id)))?;
    Ok(Json(transcript))
}

/// PUT /api/transcripts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTranscript>,
) -> AppResult<Json<Transcript>> {
    input.title =
        require_text_if_present("Title", input.title.as_deref()).map_err(AppError::BadRequest)?;
    validate_duration(input.duration_minutes.flatten())?;
    if let Some(Some(meeting_id)) = input.meeting_id {
        let current = TranscriptRepo::find_for_user(&state.pool, id, auth.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::not_found("Transcript", id)))?;
        require_meeting(&state.pool, meeting_id, current.story_id, auth.user_id).await?;
    }

    let transcript = TranscriptRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Transcript", id)))?;
    Ok(Json(transcript))
}

/// DELETE /api/transcripts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TranscriptRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Transcript", id)))
    }
}
