//! Writing-assistant endpoints: interview questions, outreach emails and
//! editorial review.
//!
//! These never fail because of the AI provider. When no provider is
//! configured or it misbehaves the response is a deterministic fallback
//! with `aiGenerated: false`. Ownership of referenced rows is still
//! enforced.

use axum::extract::State;
use serde::Deserialize;
use storydesk_ai::types::{
    ContactContext, EmailBrief, EmailDraft, QuestionBrief, QuestionSet, Review, ReviewBrief,
    StoryContext,
};
use storydesk_core::email::{validate_purpose, validate_tone, DEFAULT_PURPOSE, DEFAULT_TONE};
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_db::models::contact::Contact;
use storydesk_db::models::story::Story;
use storydesk_db::repositories::{ArticleRepo, ContactRepo, StoryRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::required_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Questions returned when `count` is omitted.
const DEFAULT_QUESTION_COUNT: usize = 10;
const MAX_QUESTION_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub story_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    pub focus: Option<String>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEmailRequest {
    pub contact_id: Option<DbId>,
    pub story_id: Option<DbId>,
    pub purpose: Option<String>,
    pub tone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub article_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<String>,
}

fn story_context(story: Story) -> StoryContext {
    StoryContext {
        title: story.title,
        description: story.description,
    }
}

fn contact_context(contact: Contact) -> ContactContext {
    ContactContext {
        name: contact.name,
        organization: contact.organization,
        role: contact.role,
        expertise: contact.expertise,
    }
}

async fn load_story(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Story> {
    StoryRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Story", id)))
}

async fn load_contact(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Contact> {
    ContactRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Contact", id)))
}

/// POST /api/questions/generate
pub async fn generate_questions(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<GenerateQuestionsRequest>,
) -> AppResult<Json<QuestionSet>> {
    let story_id = required_id(input.story_id, "storyId")?;
    let count = input.count.unwrap_or(DEFAULT_QUESTION_COUNT);
    if !(1..=MAX_QUESTION_COUNT).contains(&count) {
        return Err(AppError::BadRequest(format!(
            "count must be between 1 and {MAX_QUESTION_COUNT}"
        )));
    }

    let story = load_story(&state, story_id, auth.user_id).await?;
    let contact = match input.contact_id {
        Some(id) => Some(load_contact(&state, id, auth.user_id).await?),
        None => None,
    };

    let brief = QuestionBrief {
        story: story_context(story),
        contact: contact.map(contact_context),
        focus: input.focus.filter(|f| !f.trim().is_empty()),
        count,
    };
    let set = state.ai.interview_questions(&brief).await;
    tracing::debug!(
        story_id,
        questions = set.questions.len(),
        ai_generated = set.ai_generated,
        "Interview questions generated"
    );
    Ok(Json(set))
}

/// POST /api/emails/draft
pub async fn draft_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DraftEmailRequest>,
) -> AppResult<Json<EmailDraft>> {
    let contact_id = required_id(input.contact_id, "contactId")?;
    let purpose = input.purpose.unwrap_or_else(|| DEFAULT_PURPOSE.to_string());
    let tone = input.tone.unwrap_or_else(|| DEFAULT_TONE.to_string());
    validate_purpose(&purpose).map_err(AppError::BadRequest)?;
    validate_tone(&tone).map_err(AppError::BadRequest)?;

    let contact = load_contact(&state, contact_id, auth.user_id).await?;
    let story = match input.story_id {
        Some(id) => Some(load_story(&state, id, auth.user_id).await?),
        None => None,
    };
    let sender = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", auth.user_id)))?;

    let brief = EmailBrief {
        purpose,
        tone,
        contact: contact_context(contact),
        story: story.map(story_context),
        sender_name: sender.name,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
    };
    Ok(Json(state.ai.draft_email(&brief).await))
}

/// POST /api/review
///
/// Reviews either an owned article (`articleId`, whose review is then
/// stored on the row) or ad-hoc `content`.
pub async fn review(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<Review>> {
    let brief = match input.article_id {
        Some(article_id) => {
            let article = ArticleRepo::find_for_user(&state.pool, article_id, auth.user_id)
                .await?
                .ok_or(AppError::Core(CoreError::not_found("Article", article_id)))?;
            ReviewBrief {
                title: Some(article.title),
                content: article.content,
            }
        }
        None => ReviewBrief {
            title: input.title,
            content: input.content.unwrap_or_default(),
        },
    };
    if brief.content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".into()));
    }

    let review = state.ai.review_article(&brief).await;

    if let Some(article_id) = input.article_id {
        let stored = serde_json::to_value(&review)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize review: {e}")))?;
        ArticleRepo::set_review(&state.pool, article_id, auth.user_id, &stored).await?;
        tracing::info!(article_id, score = review.overall_score, "Article review stored");
    }

    Ok(Json(review))
}
