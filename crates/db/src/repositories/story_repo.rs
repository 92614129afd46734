//! Repository for the `stories` table.
//!
//! Stories are the ownership root: every child repository joins back here to
//! check `stories.user_id`.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::story::{CreateStory, Story, StoryDetail, StorySummary, UpdateStory};
use crate::repositories::{ArticleRepo, ContactRepo, MeetingRepo, ResearchRepo, TranscriptRepo};

/// Column list shared across queries, qualified with the `s` alias.
const COLUMNS: &str = "s.id, s.user_id, s.title, s.description, s.status, s.progress, \
                       s.deadline, s.tags, s.created_at, s.updated_at";

/// Provides ownership-scoped CRUD operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story owned by `user_id`, returning the created row.
    ///
    /// Status defaults to `planning`, progress to 0, tags to empty.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories AS s (user_id, title, description, status, progress, deadline, tags)
             VALUES ($1, $2, $3, COALESCE($4, 'planning'), COALESCE($5, 0), $6,
                     COALESCE($7, '{{}}'::TEXT[]))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.progress)
            .bind(input.deadline)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// List the user's stories with child counts, most recently updated first.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<StorySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COUNT(*) FROM story_contacts sc WHERE sc.story_id = s.id) AS contact_count,
                (SELECT COUNT(*) FROM research r WHERE r.story_id = s.id) AS research_count,
                (SELECT COUNT(*) FROM articles a WHERE a.story_id = s.id) AS article_count,
                (SELECT COUNT(*) FROM meetings m WHERE m.story_id = s.id) AS meeting_count,
                (SELECT COUNT(*) FROM transcripts t WHERE t.story_id = s.id) AS transcript_count
             FROM stories s
             WHERE s.user_id = $1
             ORDER BY s.updated_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, StorySummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a story by ID if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories s WHERE s.id = $1 AND s.user_id = $2");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether story `id` exists and belongs to `user_id`.
    pub async fn is_owned_by(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM stories WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Load a story with all of its children. The child queries run
    /// concurrently on the pool.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<StoryDetail>, sqlx::Error> {
        let Some(story) = Self::find_for_user(pool, id, user_id).await? else {
            return Ok(None);
        };

        let (contacts, research, articles, meetings, transcripts) = futures::try_join!(
            ContactRepo::list_by_story(pool, id, user_id),
            ResearchRepo::list(pool, user_id, Some(id)),
            ArticleRepo::list(pool, user_id, Some(id)),
            MeetingRepo::list(pool, user_id, Some(id), false),
            TranscriptRepo::list(pool, user_id, Some(id)),
        )?;

        Ok(Some(StoryDetail {
            story,
            contacts,
            research,
            articles,
            meetings,
            transcripts,
        }))
    }

    /// Update a story owned by `user_id`.
    ///
    /// Returns `None` if no such story exists for this user.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let (set_description, description) = patch::parts(&input.description);
        let (set_deadline, deadline) = patch::parts(&input.deadline);

        let query = format!(
            "UPDATE stories s SET
                title = COALESCE($3, s.title),
                description = CASE WHEN $4 THEN $5 ELSE s.description END,
                status = COALESCE($6, s.status),
                progress = COALESCE($7, s.progress),
                deadline = CASE WHEN $8 THEN $9 ELSE s.deadline END,
                tags = COALESCE($10, s.tags)
             WHERE s.id = $1 AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(set_description)
            .bind(description)
            .bind(&input.status)
            .bind(input.progress)
            .bind(set_deadline)
            .bind(deadline)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a story owned by `user_id`. Children are removed by the schema's
    /// `ON DELETE CASCADE` rules. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
