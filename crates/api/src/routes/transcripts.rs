//! Route definitions for the `/transcripts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::transcript;
use crate::state::AppState;

/// Routes mounted at `/transcripts`.
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
        .route("/", get(transcript::list).post(transcript::create))
        .route(
            "/{id}",
            get(transcript::get_by_id)
                .put(transcript::update)
                .delete(transcript::delete),
        )
}
