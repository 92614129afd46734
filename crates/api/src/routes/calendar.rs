//! Route definitions for the `/calendar` integration.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
///
/// ```text
/// GET    /status               -> status
/// GET    /auth-url             -> auth_url
/// POST   /callback             -> callback
/// DELETE /disconnect           -> disconnect
/// GET    /events               -> events
/// POST   /meetings/{id}/sync   -> sync_meeting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(calendar::status))
        .route("/auth-url", get(calendar::auth_url))
        .route("/callback", post(calendar::callback))
        .route("/disconnect", delete(calendar::disconnect))
        .route("/events", get(calendar::events))
        .route("/meetings/{id}/sync", post(calendar::sync_meeting))
}
