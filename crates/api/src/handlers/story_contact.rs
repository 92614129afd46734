//! Handlers for contacts linked to a story (`/stories/{id}/contacts`).

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::contact::validate_link_status;
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_db::models::contact::{
    CreateStoryContact, StoryContact, StoryContactView, UpdateStoryContact,
};
use storydesk_db::repositories::{ContactRepo, StoryContactRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::handlers::{require_contact, require_story, required_id};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/stories/{story_id}/contacts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<Vec<StoryContactView>>> {
    require_story(&state.pool, story_id, auth.user_id).await?;
    let contacts = ContactRepo::list_by_story(&state.pool, story_id, auth.user_id).await?;
    Ok(Json(contacts))
}

/// POST /api/stories/{story_id}/contacts
///
/// Link an existing contact. Linking the same contact twice is a 409.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<DbId>,
    Json(input): Json<CreateStoryContact>,
) -> AppResult<(StatusCode, Json<StoryContact>)> {
    let contact_id = required_id(input.contact_id, "contactId")?;
    if let Some(status) = &input.status {
        validate_link_status(status).map_err(AppError::BadRequest)?;
    }
    require_story(&state.pool, story_id, auth.user_id).await?;
    require_contact(&state.pool, contact_id, auth.user_id).await?;

    let link = StoryContactRepo::link(
        &state.pool,
        story_id,
        contact_id,
        auth.user_id,
        input.status.as_deref(),
        input.notes.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found("Story", story_id)))?;

    tracing::info!(story_id, contact_id, "Contact linked to story");
    Ok((StatusCode::CREATED, Json(link)))
}

/// PUT /api/stories/{story_id}/contacts/{contact_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((story_id, contact_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateStoryContact>,
) -> AppResult<Json<StoryContact>> {
    if let Some(status) = &input.status {
        validate_link_status(status).map_err(AppError::BadRequest)?;
    }
    let link = StoryContactRepo::update(&state.pool, story_id, contact_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("StoryContact", contact_id)))?;
    Ok(Json(link))
}

/// DELETE /api/stories/{story_id}/contacts/{contact_id}
///
/// Removes the link only; the contact itself is kept.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((story_id, contact_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if StoryContactRepo::unlink(&state.pool, story_id, contact_id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("StoryContact", contact_id)))
    }
}
