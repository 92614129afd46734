use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event to create on the user's primary calendar.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A calendar event as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    /// RFC 3339 date-time, or `YYYY-MM-DD` for all-day events.
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub html_link: Option<String>,
}

/// Event resource as Google returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventList {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
}

impl From<GoogleEvent> for CalendarEvent {
    fn from(e: GoogleEvent) -> Self {
        let time = |t: Option<EventTime>| t.and_then(|t| t.date_time.or(t.date));
        Self {
            id: e.id,
            summary: e.summary.unwrap_or_else(|| "(untitled)".to_string()),
            start: time(e.start),
            end: time(e.end),
            location: e.location,
            html_link: e.html_link,
        }
    }
}
