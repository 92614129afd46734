//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

use crate::models::article::Article;
use crate::models::contact::StoryContactView;
use crate::models::meeting::Meeting;
use crate::models::research::Research;
use crate::models::transcript::Transcript;

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub progress: i32,
    pub deadline: Option<Timestamp>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A story plus the number of attached children, as shown in list views.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub story: Story,
    pub contact_count: i64,
    pub research_count: i64,
    pub article_count: i64,
    pub meeting_count: i64,
    pub transcript_count: i64,
}

/// A story with every child collection loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDetail {
    #[serde(flatten)]
    pub story: Story,
    pub contacts: Vec<StoryContactView>,
    pub research: Vec<Research>,
    pub articles: Vec<Article>,
    pub meetings: Vec<Meeting>,
    pub transcripts: Vec<Transcript>,
}

/// DTO for creating a new story.
///
/// `title` defaults to empty so a missing title reaches validation and
/// produces a 400 rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStory {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `planning` if omitted.
    pub status: Option<String>,
    /// Defaults to 0 if omitted.
    pub progress: Option<i32>,
    pub deadline: Option<Timestamp>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating a story. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStory {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub progress: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<Timestamp>>,
    pub tags: Option<Vec<String>>,
}
