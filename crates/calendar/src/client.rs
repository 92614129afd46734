//! HTTP client for Google's OAuth and Calendar v3 endpoints.

use chrono::{DateTime, Utc};
use reqwest::Url;

use crate::config::GoogleOAuthConfig;
use crate::error::CalendarError;
use crate::tokens::{CalendarTokens, TokenResponse};
use crate::types::{CalendarEvent, EventList, GoogleEvent, NewEvent};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";
const SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Outbound timeout for Google calls, in seconds.
const TIMEOUT_SECS: u64 = 15;

/// Talks to Google on behalf of users who granted calendar access.
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
    events_url: String,
}

impl GoogleCalendarClient {
    pub fn new(config: GoogleOAuthConfig) -> Result<Self, CalendarError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            config,
            events_url: EVENTS_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_events_url(mut self, url: impl Into<String>) -> Self {
        self.events_url = url.into();
        self
    }

    /// Consent-screen URL requesting offline access to calendar events.
    ///
    /// `state` is echoed back to the redirect URI unchanged.
    pub fn auth_url(&self, state: &str) -> Result<String, CalendarError> {
        let url = Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| CalendarError::Url(e.to_string()))?;
        Ok(url.into())
    }

    /// Exchange an authorization code for a token set.
    pub async fn exchange_code(&self, code: &str) -> Result<CalendarTokens, CalendarError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;
        let body: TokenResponse = ensure_success(response).await?.json().await?;
        Ok(CalendarTokens::from_response(body, None, Utc::now()))
    }

    /// Obtain a new access token using the stored refresh token.
    pub async fn refresh(&self, tokens: &CalendarTokens) -> Result<CalendarTokens, CalendarError> {
        let refresh_token = tokens
            .refresh_token
            .as_deref()
            .ok_or(CalendarError::ReauthorizationRequired)?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("refresh_token", refresh_token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        let body: TokenResponse = ensure_success(response).await?.json().await?;
        tracing::debug!("Refreshed Google Calendar access token");
        Ok(CalendarTokens::from_response(
            body,
            Some(refresh_token.to_string()),
            Utc::now(),
        ))
    }

    /// Return usable tokens, refreshing them if they have expired.
    ///
    /// The second element is `true` when the tokens changed and should be
    /// persisted.
    pub async fn ensure_fresh(
        &self,
        tokens: CalendarTokens,
    ) -> Result<(CalendarTokens, bool), CalendarError> {
        if tokens.is_expired(Utc::now()) {
            Ok((self.refresh(&tokens).await?, true))
        } else {
            Ok((tokens, false))
        }
    }

    /// Upcoming events on the primary calendar, soonest first.
    pub async fn list_upcoming(
        &self,
        tokens: &CalendarTokens,
        from: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let url = Url::parse_with_params(
            &self.events_url,
            &[
                ("timeMin", from.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .map_err(|e| CalendarError::Url(e.to_string()))?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;
        let list: EventList = ensure_success(response).await?.json().await?;
        Ok(list.items.into_iter().map(CalendarEvent::from).collect())
    }

    /// Create an event on the primary calendar.
    pub async fn create_event(
        &self,
        tokens: &CalendarTokens,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        let response = self
            .http
            .post(&self.events_url)
            .bearer_auth(&tokens.access_token)
            .json(&event_body(event))
            .send()
            .await?;
        let created: GoogleEvent = ensure_success(response).await?.json().await?;
        Ok(created.into())
    }

    /// Overwrite the fields of an existing event.
    pub async fn update_event(
        &self,
        tokens: &CalendarTokens,
        event_id: &str,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        let mut url =
            Url::parse(&self.events_url).map_err(|e| CalendarError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| CalendarError::Url(self.events_url.clone()))?
            .push(event_id);

        let response = self
            .http
            .patch(url)
            .bearer_auth(&tokens.access_token)
            .json(&event_body(event))
            .send()
            .await?;
        let updated: GoogleEvent = ensure_success(response).await?.json().await?;
        Ok(updated.into())
    }

    /// Update `existing` when given, otherwise create a new event.
    ///
    /// An event that was deleted on Google's side is recreated.
    pub async fn sync_event(
        &self,
        tokens: &CalendarTokens,
        existing: Option<&str>,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        let Some(event_id) = existing else {
            return self.create_event(tokens, event).await;
        };
        match self.update_event(tokens, event_id, event).await {
            Err(CalendarError::ApiError { status: 404 | 410, .. }) => {
                tracing::warn!(event_id, "Calendar event is gone, creating a new one");
                self.create_event(tokens, event).await
            }
            other => other,
        }
    }
}

fn event_body(event: &NewEvent) -> serde_json::Value {
    serde_json::json!({
        "summary": event.summary,
        "description": event.description,
        "location": event.location,
        "start": { "dateTime": event.start.to_rfc3339() },
        "end": { "dateTime": event.end.to_rfc3339() },
    })
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CalendarError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(CalendarError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
