//! The assistant facade used by the HTTP layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::AiConfig;
use crate::error::AiError;
use crate::extract::{json_array, json_object};
use crate::fallback;
use crate::gemini::GeminiClient;
use crate::perplexity::PerplexityClient;
use crate::prompts;
use crate::provider::TextGenerator;
use crate::types::{
    EmailBrief, EmailDraft, InterviewQuestion, QuestionBrief, QuestionSet, Review, ReviewBrief,
    ReviewSuggestion, SearchResult, StoryContext,
};

/// Routes each feature to a provider and applies fallbacks.
///
/// Search prefers Perplexity (it cites sources) and falls back to Gemini.
/// Generation prefers Gemini and falls back to Perplexity.
#[derive(Clone, Default)]
pub struct AiService {
    search: Option<Arc<dyn TextGenerator>>,
    writer: Option<Arc<dyn TextGenerator>>,
}

/// Review shape as emitted by the model, before clamping.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReview {
    overall_score: f64,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    suggestions: Vec<ReviewSuggestion>,
}

impl AiService {
    pub fn new(
        search: Option<Arc<dyn TextGenerator>>,
        writer: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self { search, writer }
    }

    /// Build the configured provider clients.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let gemini: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.timeout_secs,
            )?)),
            None => None,
        };
        let perplexity: Option<Arc<dyn TextGenerator>> = match &config.perplexity_api_key {
            Some(key) => Some(Arc::new(PerplexityClient::new(
                key.clone(),
                config.perplexity_model.clone(),
                config.timeout_secs,
            )?)),
            None => None,
        };

        Ok(Self {
            search: perplexity.clone().or_else(|| gemini.clone()),
            writer: gemini.or(perplexity),
        })
    }

    pub fn search_available(&self) -> bool {
        self.search.is_some()
    }

    pub fn generation_available(&self) -> bool {
        self.writer.is_some()
    }

    /// Answer a research query.
    ///
    /// Unlike the generation features this has no fallback:
    /// [`AiError::NotConfigured`] when no provider is set, or the provider's
    /// own error.
    pub async fn search(
        &self,
        query: &str,
        story: Option<&StoryContext>,
    ) -> Result<SearchResult, AiError> {
        let provider = self.search.as_ref().ok_or(AiError::NotConfigured)?;
        let completion = provider.complete(&prompts::search(query, story)).await?;

        tracing::debug!(
            provider = provider.name(),
            sources = completion.citations.len(),
            "Research search completed"
        );

        Ok(SearchResult {
            query: query.to_string(),
            result: completion.text.trim().to_string(),
            sources: completion.citations,
            ai_generated: true,
        })
    }

    /// Generate interview questions, falling back to a general list.
    pub async fn interview_questions(&self, brief: &QuestionBrief) -> QuestionSet {
        let generated = self
            .generate(&prompts::interview_questions(brief), |text| {
                json_array::<Vec<InterviewQuestion>>(text).filter(|qs| !qs.is_empty())
            })
            .await;

        match generated {
            Some(mut questions) => {
                questions.truncate(brief.count.max(1));
                QuestionSet {
                    questions,
                    ai_generated: true,
                }
            }
            None => QuestionSet {
                questions: fallback::questions(brief),
                ai_generated: false,
            },
        }
    }

    /// Draft an outreach email, falling back to a per-purpose template.
    pub async fn draft_email(&self, brief: &EmailBrief) -> EmailDraft {
        let generated = self
            .generate(&prompts::email(brief), |text| {
                json_object::<EmailDraft>(text)
                    .filter(|d| !d.subject.trim().is_empty() && !d.body.trim().is_empty())
            })
            .await;

        match generated {
            Some(draft) => EmailDraft {
                ai_generated: true,
                ..draft
            },
            None => fallback::email(brief),
        }
    }

    /// Review an article, falling back to heuristic checks.
    pub async fn review_article(&self, brief: &ReviewBrief) -> Review {
        let generated = self
            .generate(&prompts::review(brief), json_object::<ModelReview>)
            .await;

        match generated {
            Some(r) => Review {
                // Saturating float-to-int cast; NaN becomes 0 and is clamped to 1.
                overall_score: fallback::clamp_score(r.overall_score.round() as i32),
                summary: r.summary,
                strengths: r.strengths,
                suggestions: r.suggestions,
                ai_generated: true,
            },
            None => fallback::review(brief),
        }
    }

    /// Run `prompt` through the writer and parse its output.
    ///
    /// Returns `None` when there is no writer, the call fails, or `parse`
    /// rejects the output. Failures are logged, never propagated.
    async fn generate<T>(&self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let provider = self.writer.as_ref()?;
        match provider.complete(prompt).await {
            Ok(completion) => {
                let parsed = parse(&completion.text);
                if parsed.is_none() {
                    tracing::warn!(
                        provider = provider.name(),
                        "Unparseable model output, using fallback"
                    );
                }
                parsed
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), error = %e, "AI call failed, using fallback");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Completion;
    use crate::types::ContactContext;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    /// Returns a canned reply, or an error when `reply` is `None`.
    struct Stub {
        reply: Option<&'static str>,
        citations: Vec<String>,
    }

    #[async_trait]
    impl TextGenerator for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn complete(&self, _prompt: &str) -> Result<Completion, AiError> {
            match self.reply {
                Some(text) => Ok(Completion {
                    text: text.to_string(),
                    citations: self.citations.clone(),
                }),
                None => Err(AiError::ApiError {
                    provider: "stub",
                    status: 500,
                    body: "boom".into(),
                }),
            }
        }
    }

    fn with_reply(reply: Option<&'static str>) -> AiService {
        let stub: Arc<dyn TextGenerator> = Arc::new(Stub {
            reply,
            citations: vec!["https://example.com/report".into()],
        });
        AiService::new(Some(stub.clone()), Some(stub))
    }

    fn question_brief(count: usize) -> QuestionBrief {
        QuestionBrief {
            story: StoryContext {
                title: "Transit delays".into(),
                description: None,
            },
            contact: None,
            focus: None,
            count,
        }
    }

    fn email_brief() -> EmailBrief {
        EmailBrief {
            purpose: "interview_request".into(),
            tone: "professional".into(),
            contact: ContactContext {
                name: "Lee".into(),
                ..Default::default()
            },
            story: None,
            sender_name: "Sam".into(),
            notes: None,
        }
    }

    #[test]
    fn from_config_without_keys_is_disabled() {
        let service = AiService::from_config(&AiConfig::default()).unwrap();
        assert!(!service.search_available());
        assert!(!service.generation_available());
    }

    #[tokio::test]
    async fn search_without_provider_is_not_configured() {
        let err = AiService::default().search("q", None).await.unwrap_err();
        assert_matches!(err, AiError::NotConfigured);
    }

    #[tokio::test]
    async fn search_propagates_provider_error() {
        let err = with_reply(None).search("q", None).await.unwrap_err();
        assert_matches!(err, AiError::ApiError { status: 500, .. });
    }

    #[tokio::test]
    async fn search_returns_text_and_citations() {
        let result = with_reply(Some("  Ridership fell 12%.  "))
            .search("ridership", None)
            .await
            .unwrap();
        assert_eq!(result.result, "Ridership fell 12%.");
        assert_eq!(result.sources, vec!["https://example.com/report".to_string()]);
        assert!(result.ai_generated);
    }

    #[tokio::test]
    async fn questions_parsed_and_truncated() {
        let reply = r#"Sure! [
            {"question": "Q1?", "category": "factual", "rationale": "r"},
            {"question": "Q2?"},
            {"question": "Q3?"}
        ]"#;
        let set = with_reply(Some(reply))
            .interview_questions(&question_brief(2))
            .await;
        assert!(set.ai_generated);
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.questions[1].category, "general");
    }

    #[tokio::test]
    async fn questions_fall_back_without_provider() {
        let set = AiService::default()
            .interview_questions(&question_brief(4))
            .await;
        assert!(!set.ai_generated);
        assert_eq!(set.questions.len(), 4);
        assert!(set.questions[0].question.contains("Transit delays"));
    }

    #[tokio::test]
    async fn questions_fall_back_on_garbage() {
        let set = with_reply(Some("I cannot help with that."))
            .interview_questions(&question_brief(3))
            .await;
        assert!(!set.ai_generated);
    }

    #[tokio::test]
    async fn email_parsed() {
        let reply = r#"{"subject": "Hello", "body": "Dear Lee, ..."}"#;
        let draft = with_reply(Some(reply)).draft_email(&email_brief()).await;
        assert!(draft.ai_generated);
        assert_eq!(draft.subject, "Hello");
    }

    #[tokio::test]
    async fn email_falls_back_on_provider_error() {
        let draft = with_reply(None).draft_email(&email_brief()).await;
        assert!(!draft.ai_generated);
        assert!(draft.body.starts_with("Dear Lee,"));
    }

    #[tokio::test]
    async fn review_score_is_clamped() {
        let reply = r#"{"overallScore": 14, "summary": "Strong", "strengths": ["x"], "suggestions": []}"#;
        let review = with_reply(Some(reply))
            .review_article(&ReviewBrief {
                title: None,
                content: "Body".into(),
            })
            .await;
        assert!(review.ai_generated);
        assert_eq!(review.overall_score, 10);
        assert_eq!(review.summary, "Strong");
    }

    #[tokio::test]
    async fn review_falls_back_without_provider() {
        let review = AiService::default()
            .review_article(&ReviewBrief {
                title: None,
                content: "Short.".into(),
            })
            .await;
        assert!(!review.ai_generated);
        assert!((1..=10).contains(&review.overall_score));
    }
}
