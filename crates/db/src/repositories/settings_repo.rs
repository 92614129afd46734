//! Repository for the `settings` table.

use sqlx::PgPool;
use storydesk_core::types::DbId;

use crate::models::settings::{Settings, UpdateSettings};

const COLUMNS: &str = "id, user_id, email_notifications, ai_suggestions, auto_save, \
                       theme, timezone, created_at, updated_at";

/// Provides access to per-user settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Return the user's settings, inserting the defaults first if the row is
    /// missing (accounts created before settings existed).
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Settings, sqlx::Error> {
        sqlx::query("INSERT INTO settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM settings WHERE user_id = $1");
        sqlx::query_as::<_, Settings>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Update settings. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateSettings,
    ) -> Result<Settings, sqlx::Error> {
        Self::get_or_create(pool, user_id).await?;

        let query = format!(
            "UPDATE settings SET
                email_notifications = COALESCE($2, email_notifications),
                ai_suggestions = COALESCE($3, ai_suggestions),
                auto_save = COALESCE($4, auto_save),
                theme = COALESCE($5, theme),
                timezone = COALESCE($6, timezone)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(user_id)
            .bind(input.email_notifications)
            .bind(input.ai_suggestions)
            .bind(input.auto_save)
            .bind(&input.theme)
            .bind(&input.timezone)
            .fetch_one(pool)
            .await
    }
}
