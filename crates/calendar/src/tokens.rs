//! OAuth token set persisted as JSON on the user row.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Renew tokens this long before they actually expire.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Access and refresh tokens for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Body of Google's token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl CalendarTokens {
    pub(crate) fn from_response(
        response: TokenResponse,
        previous_refresh: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            // Refresh responses usually omit the refresh token.
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: now + Duration::seconds(response.expires_in.unwrap_or(3600)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Parse a stored token blob. Returns `None` for malformed data.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
