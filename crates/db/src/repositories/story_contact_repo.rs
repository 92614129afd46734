//! Repository for the `story_contacts` join table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::contact::{StoryContact, UpdateStoryContact};

const COLUMNS: &str =
    "sc.id, sc.story_id, sc.contact_id, sc.status, sc.notes, sc.created_at, sc.updated_at";

/// Links contacts to stories.
pub struct StoryContactRepo;

impl StoryContactRepo {
    /// Link a contact to a story.
    ///
    /// The insert only happens when both the story and the contact belong to
    /// `user_id`; `None` means one of them does not. Linking the same pair
    /// twice violates `uq_story_contacts`.
    pub async fn link(
        pool: &PgPool,
        story_id: DbId,
        contact_id: DbId,
        user_id: DbId,
        status: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<StoryContact>, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_contacts AS sc (story_id, contact_id, status, notes)
             SELECT s.id, c.id, COALESCE($4, 'identified'), $5
             FROM stories s
             JOIN contacts c ON c.id = $2 AND c.user_id = $3
             WHERE s.id = $1 AND s.user_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryContact>(&query)
            .bind(story_id)
            .bind(contact_id)
            .bind(user_id)
            .bind(status)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Update the link attributes. Returns `None` if the link does not exist
    /// or the story is not owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        story_id: DbId,
        contact_id: DbId,
        user_id: DbId,
        input: &UpdateStoryContact,
    ) -> Result<Option<StoryContact>, sqlx::Error> {
        let (set_notes, notes) = patch::parts(&input.notes);
        let query = format!(
            "UPDATE story_contacts sc SET
                status = COALESCE($4, sc.status),
                notes = CASE WHEN $5 THEN $6 ELSE sc.notes END
             FROM stories s
             WHERE sc.story_id = $1 AND sc.contact_id = $2
               AND s.id = sc.story_id AND s.user_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryContact>(&query)
            .bind(story_id)
            .bind(contact_id)
            .bind(user_id)
            .bind(&input.status)
            .bind(set_notes)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Remove a link. Returns `true` if a row was deleted.
    pub async fn unlink(
        pool: &PgPool,
        story_id: DbId,
        contact_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM story_contacts sc
             USING stories s
             WHERE sc.story_id = $1 AND sc.contact_id = $2
               AND s.id = sc.story_id AND s.user_id = $3",
        )
        .bind(story_id)
        .bind(contact_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
