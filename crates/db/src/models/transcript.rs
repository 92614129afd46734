//! Interview transcript model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `transcripts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: DbId,
    pub story_id: DbId,
    pub meeting_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub source: Option<String>,
    pub duration_minutes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a transcript.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranscript {
    pub story_id: Option<DbId>,
    pub meeting_id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub source: Option<String>,
    pub duration_minutes: Option<i32>,
}

/// DTO for updating a transcript.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranscript {
    #[serde(default, deserialize_with = "double_option")]
    pub meeting_id: Option<Option<DbId>>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub duration_minutes: Option<Option<i32>>,
}
