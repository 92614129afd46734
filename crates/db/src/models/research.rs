//! Research note model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `research` table.
///
/// `story_id` is `None` for research kept outside any story; such rows are
/// still owned by (and only visible to) `user_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    pub id: DbId,
    pub user_id: DbId,
    pub story_id: Option<DbId>,
    pub query: String,
    pub result: Option<String>,
    /// JSON array of source descriptors (`{title, url}` or plain strings).
    pub sources: serde_json::Value,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a research note.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResearch {
    #[serde(default)]
    pub query: String,
    pub story_id: Option<DbId>,
    pub result: Option<String>,
    pub sources: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// DTO for updating a research note.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResearch {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub story_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub result: Option<Option<String>>,
    pub sources: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
