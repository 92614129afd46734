//! Route definitions for the `/meetings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::meeting;
use crate::state::AppState;

/// Routes mounted at `/meetings`.
///
/// ```text
/// GET    /       -> list (?storyId=, ?upcoming=true)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meeting::list).post(meeting::create))
        .route(
            "/{id}",
            get(meeting::get_by_id)
                .put(meeting::update)
                .delete(meeting::delete),
        )
}
