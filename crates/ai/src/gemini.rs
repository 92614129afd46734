//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AiError;
use crate::provider::{ensure_success, http_client, Completion, TextGenerator};

const PROVIDER: &str = "Gemini";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for one Gemini model.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Result<Self, AiError> {
        Ok(Self {
            client: http_client(timeout_secs)?,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, AiError> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.7 },
        });

        let response = self
            .client
            .post(format!("{API_BASE}/models/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let parsed: GenerateResponse = ensure_success(PROVIDER, response).await?.json().await?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse(PROVIDER));
        }
        Ok(Completion {
            text,
            citations: Vec::new(),
        })
    }
}
