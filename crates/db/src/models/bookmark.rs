//! Bookmark (saved link or quote) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `bookmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: DbId,
    pub user_id: DbId,
    pub story_id: Option<DbId>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub quote: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a bookmark.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmark {
    pub story_id: Option<DbId>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub quote: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a bookmark.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookmark {
    #[serde(default, deserialize_with = "double_option")]
    pub story_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub quote: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
