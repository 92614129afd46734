//! Repository for the `research` table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::research::{CreateResearch, Research, UpdateResearch};

const COLUMNS: &str = "r.id, r.user_id, r.story_id, r.query, r.result, r.sources, r.notes, \
                       r.created_at, r.updated_at";

/// Provides ownership-scoped CRUD operations for research notes.
pub struct ResearchRepo;

impl ResearchRepo {
    /// Insert a research note owned by `user_id`.
    ///
    /// The caller must already have checked that `input.story_id`, when set,
    /// belongs to the same user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateResearch,
    ) -> Result<Research, sqlx::Error> {
        let query = format!(
            "INSERT INTO research AS r (user_id, story_id, query, result, sources, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, '[]'::jsonb), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Research>(&query)
            .bind(user_id)
            .bind(input.story_id)
            .bind(&input.query)
            .bind(&input.result)
            .bind(&input.sources)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List the user's research notes, most recently updated first,
    /// optionally restricted to one story.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
    ) -> Result<Vec<Research>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM research r
             WHERE r.user_id = $1 AND ($2::BIGINT IS NULL OR r.story_id = $2)
             ORDER BY r.updated_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, Research>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Find a research note by ID if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Research>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM research r WHERE r.id = $1 AND r.user_id = $2");
        sqlx::query_as::<_, Research>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a research note owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateResearch,
    ) -> Result<Option<Research>, sqlx::Error> {
        let (set_story, story_id) = patch::parts(&input.story_id);
        let (set_result, result) = patch::parts(&input.result);
        let (set_notes, notes) = patch::parts(&input.notes);

        let query = format!(
            "UPDATE research r SET
                query = COALESCE($3, r.query),
                story_id = CASE WHEN $4 THEN $5 ELSE r.story_id END,
                result = CASE WHEN $6 THEN $7 ELSE r.result END,
                sources = COALESCE($8, r.sources),
                notes = CASE WHEN $9 THEN $10 ELSE r.notes END
             WHERE r.id = $1 AND r.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Research>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.query)
            .bind(set_story)
            .bind(story_id.copied())
            .bind(set_result)
            .bind(result)
            .bind(&input.sources)
            .bind(set_notes)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a research note owned by `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM research WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
