//! The seam between the assistant and concrete model providers.

use async_trait::async_trait;

use crate::error::AiError;

/// Text returned by a provider for one prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Source URLs the provider cited, if it reports any.
    pub citations: Vec<String>,
}

/// A model that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<Completion, AiError>;
}

/// Turn a non-2xx response into [`AiError::ApiError`].
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(AiError::ApiError {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Build an HTTP client with the provider timeout applied.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, AiError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}
