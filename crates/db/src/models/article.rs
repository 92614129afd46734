//! Article draft model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: DbId,
    pub story_id: DbId,
    pub title: String,
    pub content: String,
    pub status: String,
    pub word_count: i32,
    /// Most recent editorial review, as returned by `POST /review`.
    pub last_review: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub story_id: Option<DbId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an article. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}
