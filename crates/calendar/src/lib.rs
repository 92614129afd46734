//! Google Calendar integration: OAuth consent, token storage format, and
//! the two calendar operations the newsroom needs (list upcoming events,
//! create an event for a scheduled interview).

pub mod client;
pub mod config;
pub mod error;
pub mod tokens;
pub mod types;

pub use client::GoogleCalendarClient;
pub use config::GoogleOAuthConfig;
pub use error::CalendarError;
pub use tokens::CalendarTokens;
pub use types::{CalendarEvent, NewEvent};
