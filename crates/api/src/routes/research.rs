//! Route definitions for the `/research` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::research;
use crate::state::AppState;

/// Routes mounted at `/research`.
///
/// ```text
/// GET    /         -> list (?storyId=)
/// POST   /         -> create
/// POST   /search   -> search (503 without a search provider)
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(research::list).post(research::create))
        .route("/search", post(research::search))
        .route(
            "/{id}",
            get(research::get_by_id)
                .put(research::update)
                .delete(research::delete),
        )
}
