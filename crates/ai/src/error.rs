/// Errors from the AI provider layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No provider key is configured for the requested feature.
    #[error("No AI provider is configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} API error ({status}): {body}")]
    ApiError {
        provider: &'static str,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx but without any text.
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),
}
