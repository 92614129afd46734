//! Inputs and outputs of the assistant features.

use serde::{Deserialize, Serialize};

/// The story a request is about.
#[derive(Debug, Clone, Default)]
pub struct StoryContext {
    pub title: String,
    pub description: Option<String>,
}

/// The person a request is about.
#[derive(Debug, Clone, Default)]
pub struct ContactContext {
    pub name: String,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub expertise: Option<String>,
}

/// Input for interview question generation.
#[derive(Debug, Clone)]
pub struct QuestionBrief {
    pub story: StoryContext,
    pub contact: Option<ContactContext>,
    pub focus: Option<String>,
    pub count: usize,
}

/// Input for outreach email drafting.
#[derive(Debug, Clone)]
pub struct EmailBrief {
    /// One of `storydesk_core::email::VALID_PURPOSES`.
    pub purpose: String,
    pub tone: String,
    pub contact: ContactContext,
    pub story: Option<StoryContext>,
    pub sender_name: String,
    pub notes: Option<String>,
}

/// Input for an editorial review.
#[derive(Debug, Clone)]
pub struct ReviewBrief {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(default = "general_category")]
    pub category: String,
    #[serde(default)]
    pub rationale: String,
}

fn general_category() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub questions: Vec<InterviewQuestion>,
    pub ai_generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSuggestion {
    #[serde(default = "general_category")]
    pub category: String,
    pub issue: String,
    pub suggestion: String,
}

/// Editorial review of an article draft.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// 1 to 10.
    pub overall_score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub suggestions: Vec<ReviewSuggestion>,
    pub ai_generated: bool,
}

/// Answer to a research query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    pub result: String,
    pub sources: Vec<String>,
    pub ai_generated: bool,
}
