//! Contact entity model, story links, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storydesk_core::patch::double_option;
use storydesk_core::types::{DbId, Timestamp};

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub expertise: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A story the contact is linked to, embedded in [`ContactDetail`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedStory {
    pub story_id: DbId,
    pub title: String,
    pub story_status: String,
    /// Status of the contact within this story (`identified`, `contacted`, ...).
    pub status: String,
}

/// A contact with the stories it is linked to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub stories: Vec<LinkedStory>,
}

/// DTO for creating a new contact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub expertise: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a contact. Absent fields are left unchanged, `null` clears.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub organization: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expertise: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Story <-> contact links
// ---------------------------------------------------------------------------

/// A row from the `story_contacts` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContact {
    pub id: DbId,
    pub story_id: DbId,
    pub contact_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A contact as seen from a story: contact fields plus the link attributes.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContactView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contact: Contact,
    pub link_status: String,
    pub link_notes: Option<String>,
    pub linked_at: Timestamp,
}

/// DTO for `POST /stories/{id}/contacts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryContact {
    pub contact_id: Option<DbId>,
    /// Defaults to `identified` if omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for `PUT /stories/{id}/contacts/{contact_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoryContact {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
