//! Repository for the `transcripts` table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::transcript::{CreateTranscript, Transcript, UpdateTranscript};

const COLUMNS: &str = "t.id, t.story_id, t.meeting_id, t.title, t.content, t.source, \
                       t.duration_minutes, t.created_at, t.updated_at";

/// Provides ownership-scoped CRUD operations for transcripts.
pub struct TranscriptRepo;

impl TranscriptRepo {
    /// Insert a transcript under `story_id`. Returns `None` if the story is not
    /// owned by `user_id`. The caller checks `meeting_id` ownership.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
        input: &CreateTranscript,
    ) -> Result<Option<Transcript>, sqlx::Error> {
        let query = format!(
            "INSERT INTO transcripts AS t
                (story_id, meeting_id, title, content, source, duration_minutes)
             SELECT s.id, $3, $4, $5, $6, $7
             FROM stories s
             WHERE s.id = $1 AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transcript>(&query)
            .bind(story_id)
            .bind(user_id)
            .bind(input.meeting_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.source)
            .bind(input.duration_minutes)
            .fetch_optional(pool)
            .await
    }

    /// List transcripts across the user's stories, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
    ) -> Result<Vec<Transcript>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transcripts t
             JOIN stories s ON s.id = t.story_id
             WHERE s.user_id = $1 AND ($2::BIGINT IS NULL OR t.story_id = $2)
             ORDER BY t.updated_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, Transcript>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Find a transcript by ID if its story belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Transcript>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transcripts t
             JOIN stories s ON s.id = t.story_id
             WHERE t.id = $1 AND s.user_id = $2"
        );
        sqlx::query_as::<_, Transcript>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a transcript whose story belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTranscript,
    ) -> Result<Option<Transcript>, sqlx::Error> {
        let (set_meeting, meeting_id) = patch::parts(&input.meeting_id);
        let (set_source, source) = patch::parts(&input.source);
        let (set_duration, duration) = patch::parts(&input.duration_minutes);

        let query = format!(
            "UPDATE transcripts t SET
                meeting_id = CASE WHEN $3 THEN $4 ELSE t.meeting_id END,
                title = COALESCE($5, t.title),
                content = COALESCE($6, t.content),
                source = CASE WHEN $7 THEN $8 ELSE t.source END,
                duration_minutes = CASE WHEN $9 THEN $10 ELSE t.duration_minutes END
             FROM stories s
             WHERE t.id = $1 AND s.id = t.story_id AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transcript>(&query)
            .bind(id)
            .bind(user_id)
            .bind(set_meeting)
            .bind(meeting_id.copied())
            .bind(&input.title)
            .bind(&input.content)
            .bind(set_source)
            .bind(source)
            .bind(set_duration)
            .bind(duration.copied())
            .fetch_optional(pool)
            .await
    }

    /// Delete a transcript whose story belongs to `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM transcripts t
             USING stories s
             WHERE t.id = $1 AND s.id = t.story_id AND s.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
