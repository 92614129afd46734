pub mod articles;
pub mod assistant;
pub mod auth;
pub mod bookmarks;
pub mod calendar;
pub mod contacts;
pub mod health;
pub mod meetings;
pub mod research;
pub mod settings;
pub mod stories;
pub mod transcripts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         get, update profile
/// /auth/change-password                            change password (POST)
///
/// /stories                                         list (with counts), create
/// /stories/{id}                                    get (nested), update, delete
/// /stories/{id}/contacts                           list, link
/// /stories/{id}/contacts/{contact_id}              update link, unlink
///
/// /contacts                                        list, create
/// /contacts/{id}                                   get (with stories), update, delete
///
/// /research                                        list, create
/// /research/search                                 AI search (POST)
/// /research/{id}                                   get, update, delete
///
/// /articles                                        list, create
/// /articles/{id}                                   get, update, delete
///
/// /meetings                                        list (?upcoming), create
/// /meetings/{id}                                   get, update, delete
///
/// /transcripts                                     list, create
/// /transcripts/{id}                                get, update, delete
///
/// /bookmarks                                       list, create
/// /bookmarks/{id}                                  get, update, delete
///
/// /settings                                        get, update
///
/// /questions/generate                              interview questions (POST)
/// /emails/draft                                    outreach email (POST)
/// /review                                          editorial review (POST)
///
/// /calendar/status                                 configured / connected
/// /calendar/auth-url                               consent URL
/// /calendar/callback                               exchange code (POST)
/// /calendar/disconnect                             forget tokens (DELETE)
/// /calendar/events                                 upcoming events
/// /calendar/meetings/{id}/sync                     push meeting (POST)
/// ```
///
/// Every route except register and login requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/stories", stories::router())
        .nest("/contacts", contacts::router())
        .nest("/research", research::router())
        .nest("/articles", articles::router())
        .nest("/meetings", meetings::router())
        .nest("/transcripts", transcripts::router())
        .nest("/bookmarks", bookmarks::router())
        .nest("/settings", settings::router())
        .nest("/calendar", calendar::router())
        .merge(assistant::router())
}
