pub mod article;
pub mod assistant;
pub mod auth;
pub mod bookmark;
pub mod calendar;
pub mod contact;
pub mod meeting;
pub mod research;
pub mod settings;
pub mod story;
pub mod story_contact;
pub mod transcript;

use sqlx::PgPool;
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_db::repositories::{ContactRepo, MeetingRepo, StoryRepo};

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Ownership guards for referenced parents
// ---------------------------------------------------------------------------

/// 404 unless story `id` belongs to `user_id`.
pub(crate) async fn require_story(pool: &PgPool, id: DbId, user_id: DbId) -> AppResult<()> {
    if StoryRepo::is_owned_by(pool, id, user_id).await? {
        Ok(())
    } else {
        Err(CoreError::not_found("Story", id).into())
    }
}

/// 404 unless contact `id` belongs to `user_id`.
pub(crate) async fn require_contact(pool: &PgPool, id: DbId, user_id: DbId) -> AppResult<()> {
    if ContactRepo::is_owned_by(pool, id, user_id).await? {
        Ok(())
    } else {
        Err(CoreError::not_found("Contact", id).into())
    }
}

/// 404 unless meeting `id` belongs to one of `user_id`'s stories, 400 unless
/// that story is `story_id`.
pub(crate) async fn require_meeting(
    pool: &PgPool,
    id: DbId,
    story_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    let meeting = MeetingRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or(CoreError::not_found("Meeting", id))?;
    if meeting.story_id != story_id {
        return Err(AppError::BadRequest(format!(
            "Meeting {id} belongs to a different story"
        )));
    }
    Ok(())
}

/// Unwrap a required id from a request body.
pub(crate) fn required_id(value: Option<DbId>, field: &str) -> AppResult<DbId> {
    value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}
