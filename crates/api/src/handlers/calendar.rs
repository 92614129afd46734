//! Google Calendar connection and sync.
//!
//! Every endpoint except `status` answers 503 when OAuth credentials are not
//! configured, and 400 when the user has not connected a calendar.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use storydesk_calendar::{
    CalendarError, CalendarEvent, CalendarTokens, GoogleCalendarClient, NewEvent,
};
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_db::models::meeting::Meeting;
use storydesk_db::repositories::{MeetingRepo, UserRepo};

use crate::auth::jwt::{generate_oauth_state, validate_oauth_state};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Events returned by `GET /calendar/events`.
const UPCOMING_EVENT_LIMIT: u32 = 25;

#[derive(Debug, Serialize)]
pub struct CalendarStatus {
    pub configured: bool,
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    #[serde(default)]
    pub code: String,
    /// The `state` value Google echoed back from [`auth_url`].
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub connected: bool,
}

fn client(state: &AppState) -> AppResult<Arc<GoogleCalendarClient>> {
    state.calendar.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Google Calendar is not configured".into())
    })
}

fn map_calendar_error(err: CalendarError) -> AppError {
    match err {
        e @ CalendarError::ReauthorizationRequired => AppError::BadRequest(e.to_string()),
        other => AppError::InternalError(format!("Google Calendar request failed: {other}")),
    }
}

/// Load the user's stored tokens, refreshing and persisting them if expired.
async fn fresh_tokens(
    state: &AppState,
    client: &GoogleCalendarClient,
    user_id: DbId,
) -> AppResult<CalendarTokens> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", user_id)))?;
    let tokens = user
        .calendar_tokens
        .as_ref()
        .and_then(CalendarTokens::from_json)
        .ok_or_else(|| AppError::BadRequest("Google Calendar is not connected".into()))?;

    let (tokens, refreshed) = client
        .ensure_fresh(tokens)
        .await
        .map_err(map_calendar_error)?;
    if refreshed {
        UserRepo::set_calendar_tokens(&state.pool, user_id, Some(&tokens.to_json())).await?;
        tracing::debug!(user_id, "Calendar access token refreshed");
    }
    Ok(tokens)
}

/// GET /api/calendar/status
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CalendarStatus>> {
    let connected = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .is_some_and(|u| u.calendar_tokens.is_some());
    Ok(Json(CalendarStatus {
        configured: state.calendar.is_some(),
        connected,
    }))
}

/// GET /api/calendar/auth-url
pub async fn auth_url(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AuthUrlResponse>> {
    let client = client(&state)?;
    let oauth_state = generate_oauth_state(auth.user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("OAuth state signing failed: {e}")))?;
    let url = client.auth_url(&oauth_state).map_err(map_calendar_error)?;
    tracing::debug!(user_id = auth.user_id, "Calendar consent URL issued");
    Ok(Json(AuthUrlResponse { url }))
}

/// POST /api/calendar/callback
///
/// `state` must be the one issued to this user by `auth-url` and not yet
/// expired.
pub async fn callback(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CallbackRequest>,
) -> AppResult<Json<CallbackResponse>> {
    let client = client(&state)?;
    let code = input.code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("code is required".into()));
    }
    let issued_to = validate_oauth_state(input.state.trim(), &state.config.jwt).ok();
    if issued_to != Some(auth.user_id) {
        tracing::warn!(user_id = auth.user_id, "Calendar callback with a foreign or stale state");
        return Err(AppError::BadRequest("Invalid or expired OAuth state".into()));
    }

    let tokens = client.exchange_code(code).await.map_err(map_calendar_error)?;
    UserRepo::set_calendar_tokens(&state.pool, auth.user_id, Some(&tokens.to_json())).await?;

    tracing::info!(user_id = auth.user_id, "Google Calendar connected");
    Ok(Json(CallbackResponse { connected: true }))
}

/// DELETE /api/calendar/disconnect
pub async fn disconnect(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    client(&state)?;
    UserRepo::set_calendar_tokens(&state.pool, auth.user_id, None).await?;
    tracing::info!(user_id = auth.user_id, "Google Calendar disconnected");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/calendar/events
pub async fn events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let client = client(&state)?;
    let tokens = fresh_tokens(&state, &client, auth.user_id).await?;
    let events = client
        .list_upcoming(&tokens, Utc::now(), UPCOMING_EVENT_LIMIT)
        .await
        .map_err(map_calendar_error)?;
    Ok(Json(events))
}

/// POST /api/calendar/meetings/{id}/sync
///
/// Push the meeting to the calendar. A meeting synced before updates its
/// existing event; otherwise a new event is created and its id remembered.
pub async fn sync_meeting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Meeting>> {
    let client = client(&state)?;
    let meeting = MeetingRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Meeting", id)))?;
    let tokens = fresh_tokens(&state, &client, auth.user_id).await?;

    let event = NewEvent {
        summary: meeting.title.clone(),
        description: meeting.notes.clone(),
        location: meeting.location.clone(),
        start: meeting.scheduled_at,
        end: meeting.scheduled_at + Duration::minutes(i64::from(meeting.duration_minutes)),
    };
    let synced = client
        .sync_event(&tokens, meeting.calendar_event_id.as_deref(), &event)
        .await
        .map_err(map_calendar_error)?;
    tracing::info!(meeting_id = id, event_id = %synced.id, "Meeting synced to calendar");

    if meeting.calendar_event_id.as_deref() == Some(synced.id.as_str()) {
        return Ok(Json(meeting));
    }
    let meeting = MeetingRepo::set_calendar_event_id(&state.pool, id, auth.user_id, &synced.id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Meeting", id)))?;
    Ok(Json(meeting))
}
