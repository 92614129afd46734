/// Errors from the Google Calendar layer.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Google returned a non-2xx status code.
    #[error("Google API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The access token expired and there is no refresh token to renew it.
    #[error("Calendar authorization expired; reconnect Google Calendar")]
    ReauthorizationRequired,

    /// Could not build a request URL.
    #[error("Invalid URL: {0}")]
    Url(String),
}
