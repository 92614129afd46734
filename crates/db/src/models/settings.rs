//! Per-user preferences (1:1 with `users`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: DbId,
    pub user_id: DbId,
    pub email_notifications: bool,
    pub ai_suggestions: bool,
    pub auto_save: bool,
    pub theme: String,
    pub timezone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating settings. All fields are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    pub email_notifications: Option<bool>,
    pub ai_suggestions: Option<bool>,
    pub auto_save: Option<bool>,
    pub theme: Option<String>,
    pub timezone: Option<String>,
}
