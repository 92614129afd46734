//! Route definitions for the `/bookmarks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookmark;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`.
///
/// ```text
/// GET    /       -> list (?storyId=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookmark::list).post(bookmark::create))
        .route(
            "/{id}",
            get(bookmark::get_by_id)
                .put(bookmark::update)
                .delete(bookmark::delete),
        )
}
