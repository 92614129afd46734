//! Meeting (scheduled interview) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `meetings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: DbId,
    pub story_id: DbId,
    pub contact_id: Option<DbId>,
    pub title: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    pub platform: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Google Calendar event id once the meeting has been synced.
    pub calendar_event_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a meeting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeeting {
    pub story_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    pub scheduled_at: Option<Timestamp>,
    /// Defaults to 30 if omitted.
    pub duration_minutes: Option<i32>,
    /// Defaults to `other` if omitted.
    pub platform: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a meeting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeeting {
    #[serde(default, deserialize_with = "double_option")]
    pub contact_id: Option<Option<DbId>>,
    pub title: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for `GET /meetings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingListParams {
    pub story_id: Option<DbId>,
    /// Only meetings scheduled from now on, soonest first.
    #[serde(default)]
    pub upcoming: bool,
}
