//! Perplexity chat-completions client, used for web-grounded search.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AiError;
use crate::provider::{ensure_success, http_client, Completion, TextGenerator};

const PROVIDER: &str = "Perplexity";
const API_URL: &str = "https://api.perplexity.ai/chat/completions";

const SYSTEM_PROMPT: &str = "You are a meticulous research assistant for investigative \
    journalists. Be factual and concise, and cite your sources.";

/// HTTP client for one Perplexity model.
pub struct PerplexityClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: String,
}

impl PerplexityClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Result<Self, AiError> {
        Ok(Self {
            client: http_client(timeout_secs)?,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl TextGenerator for PerplexityClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, AiError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: ChatResponse = ensure_success(PROVIDER, response).await?.json().await?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse(PROVIDER));
        }
        Ok(Completion {
            text,
            citations: parsed.citations,
        })
    }
}
