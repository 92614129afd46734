//! Route definitions for the `/stories` resource and its contact links.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{story, story_contact};
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/contacts                 -> story_contact::list
/// POST   /{id}/contacts                 -> story_contact::create
/// PUT    /{id}/contacts/{contact_id}    -> story_contact::update
/// DELETE /{id}/contacts/{contact_id}    -> story_contact::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list).post(story::create))
        .route(
            "/{id}",
            get(story::get_by_id)
                .put(story::update)
                .delete(story::delete),
        )
        .route(
            "/{id}/contacts",
            get(story_contact::list).post(story_contact::create),
        )
        .route(
            "/{id}/contacts/{contact_id}",
            put(story_contact::update).delete(story_contact::delete),
        )
}
