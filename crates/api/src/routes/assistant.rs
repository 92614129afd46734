//! Writing-assistant routes, merged directly into `/api`.

use axum::routing::post;
use axum::Router;

use crate::handlers::assistant;
use crate::state::AppState;

/// ```text
/// POST /questions/generate   -> generate_questions
/// POST /emails/draft         -> draft_email
/// POST /review               -> review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions/generate", post(assistant::generate_questions))
        .route("/emails/draft", post(assistant::draft_email))
        .route("/review", post(assistant::review))
}
