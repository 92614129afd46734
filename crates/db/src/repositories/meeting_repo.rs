//! Repository for the `meetings` table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};

const COLUMNS: &str = "m.id, m.story_id, m.contact_id, m.title, m.scheduled_at, \
                       m.duration_minutes, m.platform, m.location, m.notes, \
                       m.calendar_event_id, m.created_at, m.updated_at";

/// Provides ownership-scoped CRUD operations for meetings.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Insert a meeting under `story_id`. Returns `None` if the story is not
    /// owned by `user_id`. The caller checks `contact_id` ownership.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
        input: &CreateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "INSERT INTO meetings AS m
                (story_id, contact_id, title, scheduled_at, duration_minutes, platform,
                 location, notes)
             SELECT s.id, $3, $4, $5, COALESCE($6, 30), COALESCE($7, 'other'), $8, $9
             FROM stories s
             WHERE s.id = $1 AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(story_id)
            .bind(user_id)
            .bind(input.contact_id)
            .bind(&input.title)
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(&input.platform)
            .bind(&input.location)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// List meetings across the user's stories.
    ///
    /// Ordered most recently updated first, or soonest first when `upcoming`
    /// restricts the list to meetings that have not started yet.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        story_id: Option<DbId>,
        upcoming: bool,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let order = if upcoming {
            "m.scheduled_at ASC, m.id ASC"
        } else {
            "m.updated_at DESC, m.id DESC"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM meetings m
             JOIN stories s ON s.id = m.story_id
             WHERE s.user_id = $1
               AND ($2::BIGINT IS NULL OR m.story_id = $2)
               AND (NOT $3 OR m.scheduled_at >= NOW())
             ORDER BY {order}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(user_id)
            .bind(story_id)
            .bind(upcoming)
            .fetch_all(pool)
            .await
    }

    /// Find a meeting by ID if its story belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings m
             JOIN stories s ON s.id = m.story_id
             WHERE m.id = $1 AND s.user_id = $2"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a meeting whose story belongs to `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let (set_contact, contact_id) = patch::parts(&input.contact_id);
        let (set_location, location) = patch::parts(&input.location);
        let (set_notes, notes) = patch::parts(&input.notes);

        let query = format!(
            "UPDATE meetings m SET
                contact_id = CASE WHEN $3 THEN $4 ELSE m.contact_id END,
                title = COALESCE($5, m.title),
                scheduled_at = COALESCE($6, m.scheduled_at),
                duration_minutes = COALESCE($7, m.duration_minutes),
                platform = COALESCE($8, m.platform),
                location = CASE WHEN $9 THEN $10 ELSE m.location END,
                notes = CASE WHEN $11 THEN $12 ELSE m.notes END
             FROM stories s
             WHERE m.id = $1 AND s.id = m.story_id AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(user_id)
            .bind(set_contact)
            .bind(contact_id.copied())
            .bind(&input.title)
            .bind(input.scheduled_at)
            .bind(input.duration_minutes)
            .bind(&input.platform)
            .bind(set_location)
            .bind(location)
            .bind(set_notes)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Record the calendar event created for this meeting.
    pub async fn set_calendar_event_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        event_id: &str,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings m SET calendar_event_id = $3
             FROM stories s
             WHERE m.id = $1 AND s.id = m.story_id AND s.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a meeting whose story belongs to `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM meetings m
             USING stories s
             WHERE m.id = $1 AND s.id = m.story_id AND s.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
