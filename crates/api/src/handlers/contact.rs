//! Handlers for the `/contacts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_core::validation::{require_text, require_text_if_present};
use storydesk_db::models::contact::{Contact, ContactDetail, CreateContact, UpdateContact};
use storydesk_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    input.name = require_text("Name", &input.name).map_err(AppError::BadRequest)?;
    let contact = ContactRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(contact_id = contact.id, user_id = auth.user_id, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contacts
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Contact>>> {
    let contacts = ContactRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/{id}
///
/// Includes the stories the contact is linked to.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContactDetail>> {
    let contact = ContactRepo::find_detail(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Contact", id)))?;
    Ok(Json(contact))
}

/// PUT /api/contacts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateContact>,
) -> AppResult<Json<Contact>> {
    input.name =
        require_text_if_present("Name", input.name.as_deref()).map_err(AppError::BadRequest)?;
    let contact = ContactRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Contact", id)))?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContactRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(contact_id = id, user_id = auth.user_id, "Contact deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Contact", id)))
    }
}
