//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storydesk_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and calendar tokens -- NEVER serialize this to
/// API responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub calendar_tokens: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub calendar_connected: bool,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            calendar_connected: user.calendar_tokens.is_some(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The email must already be normalised.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// DTO for updating profile fields. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
}
