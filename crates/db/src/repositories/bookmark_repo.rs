//! Repository for the `bookmarks` table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::bookmark::{Bookmark, CreateBookmark, UpdateBookmark};

const COLUMNS: &str = "b.id, b.user_id, b.story_id, b.url, b.title, b.quote, b.notes, \
                       b.created_at, b.updated_at";

/// Provides ownership-scoped CRUD operations for bookmarks.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Insert a bookmark owned by `user_id`. The caller checks `story_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateBookmark,
    ) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks AS b (user_id, story_id, url, title, quote, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .bind(input.story_id)
            .bind(&input.url)
            .bind(&input.title)
            .bind(&input.quote)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List the user's bookmarks, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
    ) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks b
             WHERE b.user_id = $1 AND ($2::BIGINT IS NULL OR b.story_id = $2)
             ORDER BY b.updated_at DESC, b.id DESC"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Find a bookmark by ID if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks b WHERE b.id = $1 AND b.user_id = $2");
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a bookmark owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateBookmark,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let (set_story, story_id) = patch::parts(&input.story_id);
        let (set_url, url) = patch::parts(&input.url);
        let (set_title, title) = patch::parts(&input.title);
        let (set_quote, quote) = patch::parts(&input.quote);
        let (set_notes, notes) = patch::parts(&input.notes);

        let query = format!(
            "UPDATE bookmarks b SET
                story_id = CASE WHEN $3 THEN $4 ELSE b.story_id END,
                url = CASE WHEN $5 THEN $6 ELSE b.url END,
                title = CASE WHEN $7 THEN $8 ELSE b.title END,
                quote = CASE WHEN $9 THEN $10 ELSE b.quote END,
                notes = CASE WHEN $11 THEN $12 ELSE b.notes END
             WHERE b.id = $1 AND b.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .bind(user_id)
            .bind(set_story)
            .bind(story_id.copied())
            .bind(set_url)
            .bind(url)
            .bind(set_title)
            .bind(title)
            .bind(set_quote)
            .bind(quote)
            .bind(set_notes)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a bookmark owned by `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
