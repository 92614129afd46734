use std::sync::Arc;

use storydesk_ai::AiService;
use storydesk_calendar::GoogleCalendarClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storydesk_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Research search and writing assistant.
    pub ai: Arc<AiService>,
    /// Present only when Google OAuth credentials are configured.
    pub calendar: Option<Arc<GoogleCalendarClient>>,
}
