//! Repository for the `contacts` table.

use sqlx::PgPool;
use storydesk_core::patch;
use storydesk_core::types::DbId;

use crate::models::contact::{
    Contact, ContactDetail, CreateContact, LinkedStory, StoryContactView, UpdateContact,
};

/// Column list shared across queries, qualified with the `c` alias.
const COLUMNS: &str = "c.id, c.user_id, c.name, c.email, c.phone, c.organization, c.role, \
                       c.expertise, c.notes, c.created_at, c.updated_at";

/// Provides ownership-scoped CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts AS c
                (user_id, name, email, phone, organization, role, expertise, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.organization)
            .bind(&input.role)
            .bind(&input.expertise)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List the user's contacts, most recently updated first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts c
             WHERE c.user_id = $1
             ORDER BY c.updated_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List contacts linked to a story, with the link attributes.
    ///
    /// Both the story and the contacts must belong to `user_id`.
    pub async fn list_by_story(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<StoryContactView>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                    sc.status AS link_status,
                    sc.notes AS link_notes,
                    sc.created_at AS linked_at
             FROM story_contacts sc
             JOIN contacts c ON c.id = sc.contact_id
             JOIN stories s ON s.id = sc.story_id
             WHERE sc.story_id = $1 AND s.user_id = $2 AND c.user_id = $2
             ORDER BY sc.created_at, sc.id"
        );
        sqlx::query_as::<_, StoryContactView>(&query)
            .bind(story_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a contact by ID if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts c WHERE c.id = $1 AND c.user_id = $2");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether contact `id` exists and belongs to `user_id`.
    pub async fn is_owned_by(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM contacts WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find a contact with the stories it is linked to.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ContactDetail>, sqlx::Error> {
        let Some(contact) = Self::find_for_user(pool, id, user_id).await? else {
            return Ok(None);
        };

        let stories = sqlx::query_as::<_, LinkedStory>(
            "SELECT s.id AS story_id, s.title, s.status AS story_status, sc.status
             FROM story_contacts sc
             JOIN stories s ON s.id = sc.story_id
             WHERE sc.contact_id = $1 AND s.user_id = $2
             ORDER BY s.updated_at DESC, s.id DESC",
        )
        .bind(id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(ContactDetail { contact, stories }))
    }

    /// Update a contact owned by `user_id`. Absent fields are left unchanged,
    /// explicit `null`s clear the column.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let (set_email, email) = patch::parts(&input.email);
        let (set_phone, phone) = patch::parts(&input.phone);
        let (set_organization, organization) = patch::parts(&input.organization);
        let (set_role, role) = patch::parts(&input.role);
        let (set_expertise, expertise) = patch::parts(&input.expertise);
        let (set_notes, notes) = patch::parts(&input.notes);

        let query = format!(
            "UPDATE contacts c SET
                name = COALESCE($3, c.name),
                email = CASE WHEN $4 THEN $5 ELSE c.email END,
                phone = CASE WHEN $6 THEN $7 ELSE c.phone END,
                organization = CASE WHEN $8 THEN $9 ELSE c.organization END,
                role = CASE WHEN $10 THEN $11 ELSE c.role END,
                expertise = CASE WHEN $12 THEN $13 ELSE c.expertise END,
                notes = CASE WHEN $14 THEN $15 ELSE c.notes END
             WHERE c.id = $1 AND c.user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(set_email)
            .bind(email)
            .bind(set_phone)
            .bind(phone)
            .bind(set_organization)
            .bind(organization)
            .bind(set_role)
            .bind(role)
            .bind(set_expertise)
            .bind(expertise)
            .bind(set_notes)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contact owned by `user_id`. Story links go with it; meetings
    /// keep their row with `contact_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
