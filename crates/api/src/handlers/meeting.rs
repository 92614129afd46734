//! Handlers for the `/meetings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::error::CoreError;
use storydesk_core::meeting::{validate_duration, validate_platform};
use storydesk_core::types::DbId;
use storydesk_core::validation::{require_text, require_text_if_present};
use storydesk_db::models::meeting::{CreateMeeting, Meeting, MeetingListParams, UpdateMeeting};
use storydesk_db::repositories::MeetingRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::handlers::{require_contact, require_story, required_id};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn validate_details(duration: Option<i32>, platform: Option<&str>) -> AppResult<()> {
    if let Some(minutes) = duration {
        validate_duration(minutes).map_err(AppError::BadRequest)?;
    }
    if let Some(platform) = platform {
        validate_platform(platform).map_err(AppError::BadRequest)?;
    }
    Ok(())
}

/// POST /api/meetings
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateMeeting>,
) -> AppResult<(StatusCode, Json<Meeting>)> {
    let story_id = required_id(input.story_id, "storyId")?;
    input.title = require_text("Title", &input.title).map_err(AppError::BadRequest)?;
    if input.scheduled_at.is_none() {
        return Err(AppError::BadRequest("scheduledAt is required".into()));
    }
    validate_details(input.duration_minutes, input.platform.as_deref())?;
    if let Some(contact_id) = input.contact_id {
        require_contact(&state.pool, contact_id, auth.user_id).await?;
    }

    let meeting = MeetingRepo::create(&state.pool, story_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", story_id)))?;

    tracing::info!(meeting_id = meeting.id, story_id, "Meeting scheduled");
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// GET /api/meetings
///
/// `?storyId=` narrows to one story; `?upcoming=true` keeps only meetings
/// that have not started, soonest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MeetingListParams>,
) -> AppResult<Json<Vec<Meeting>>> {
    if let Some(story_id) = params.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }
    let meetings =
        MeetingRepo::list(&state.pool, auth.user_id, params.story_id, params.upcoming).await?;
    Ok(Json(meetings))
}

/// GET /api/meetings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Meeting>> {
    let meeting = MeetingRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Meeting", id)))?;
    Ok(Json(meeting))
}

/// PUT /api/meetings/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMeeting>,
) -> AppResult<Json<Meeting>> {
    input.title =
        require_text_if_present("Title", input.title.as_deref()).map_err(AppError::BadRequest)?;
    validate_details(input.duration_minutes, input.platform.as_deref())?;
    if let Some(Some(contact_id)) = input.contact_id {
        require_contact(&state.pool, contact_id, auth.user_id).await?;
    }

    let meeting = MeetingRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Meeting", id)))?;
    Ok(Json(meeting))
}

/// DELETE /api/meetings/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MeetingRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Meeting", id)))
    }
}
