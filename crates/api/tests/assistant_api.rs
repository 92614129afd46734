//! HTTP-level tests for AI search and the writing assistant.
//!
//! No real provider is contacted: either none is configured (fallback
//! paths) or a stub [`TextGenerator`] is injected.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, create_contact, create_story, get_auth, post_json_auth, register};
use serde_json::json;
use sqlx::PgPool;
use storydesk_ai::{AiError, AiService, Completion, TextGenerator};

/// Answers every prompt with a fixed completion.
struct Canned(&'static str, Vec<String>);

#[async_trait]
impl TextGenerator for Canned {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, _prompt: &str) -> Result<Completion, AiError> {
        Ok(Completion {
            text: self.0.to_string(),
            citations: self.1.clone(),
        })
    }
}

/// Fails every prompt.
struct Broken;

#[async_trait]
impl TextGenerator for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn complete(&self, _prompt: &str) -> Result<Completion, AiError> {
        Err(AiError::EmptyResponse("broken"))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_without_provider_is_503(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "search@example.com").await;

    let response = post_json_auth(
        app,
        "/api/research/search",
        json!({ "query": "port authority budget" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "SERVICE_UNAVAILABLE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_saves_result_as_research(pool: PgPool) {
    let search: Arc<dyn TextGenerator> = Arc::new(Canned(
        "The authority's budget grew 12% in 2023.",
        vec!["https://example.gov/budget".to_string()],
    ));
    let app = common::build_test_app_with_ai(pool, AiService::new(Some(search), None));
    let token = register(app.clone(), "search@example.com").await;
    let story_id = create_story(app.clone(), &token, "Port finances").await;

    let response = post_json_auth(
        app.clone(),
        "/api/research/search",
        json!({ "query": "port authority budget", "storyId": story_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["aiGenerated"], true);
    assert_eq!(json["sources"], json!(["https://example.gov/budget"]));
    assert_eq!(json["research"]["storyId"], story_id);

    let response = get_auth(app.clone(), &format!("/api/research?storyId={story_id}"), &token).await;
    let saved = body_json(response).await;
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["result"], "The authority's budget grew 12% in 2023.");

    let response = post_json_auth(
        app,
        "/api/research/search",
        json!({ "query": "unsaved", "save": false }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json.get("research").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_provider_failure_is_500(pool: PgPool) {
    let search: Arc<dyn TextGenerator> = Arc::new(Broken);
    let app = common::build_test_app_with_ai(pool, AiService::new(Some(search), None));
    let token = register(app.clone(), "search@example.com").await;

    let response =
        post_json_auth(app, "/api/research/search", json!({ "query": "anything" }), &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Generation fallbacks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn questions_fall_back_without_provider(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "questions@example.com").await;
    let story_id = create_story(app.clone(), &token, "Bridge repairs").await;

    let response = post_json_auth(
        app.clone(),
        "/api/questions/generate",
        json!({ "storyId": story_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["aiGenerated"], false);
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert!(questions
        .iter()
        .any(|q| q["question"].as_str().unwrap().contains("Bridge repairs")));

    let response = post_json_auth(
        app,
        "/api/questions/generate",
        json!({ "storyId": story_id, "count": 50 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn questions_fall_back_when_provider_fails(pool: PgPool) {
    let writer: Arc<dyn TextGenerator> = Arc::new(Broken);
    let app = common::build_test_app_with_ai(pool, AiService::new(None, Some(writer)));
    let token = register(app.clone(), "questions@example.com").await;
    let story_id = create_story(app.clone(), &token, "Bridge repairs").await;

    let response = post_json_auth(
        app,
        "/api/questions/generate",
        json!({ "storyId": story_id, "count": 3 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["aiGenerated"], false);
    assert_eq!(json["questions"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn questions_use_model_output_when_parseable(pool: PgPool) {
    let writer: Arc<dyn TextGenerator> = Arc::new(Canned(
        r#"Here you go: [{"question": "Who signed off?", "category": "accountability", "rationale": "Names names."}]"#,
        Vec::new(),
    ));
    let app = common::build_test_app_with_ai(pool, AiService::new(None, Some(writer)));
    let token = register(app.clone(), "questions@example.com").await;
    let story_id = create_story(app.clone(), &token, "Bridge repairs").await;

    let response = post_json_auth(
        app,
        "/api/questions/generate",
        json!({ "storyId": story_id }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["aiGenerated"], true);
    assert_eq!(json["questions"][0]["question"], "Who signed off?");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_draft_falls_back_to_template(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "emails@example.com").await;
    let contact_id = create_contact(app.clone(), &token, "Maria Lopez").await;
    let story_id = create_story(app.clone(), &token, "Rent control").await;

    let response = post_json_auth(
        app.clone(),
        "/api/emails/draft",
        json!({ "contactId": contact_id, "storyId": story_id, "purpose": "thank_you" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["aiGenerated"], false);
    assert!(json["subject"].as_str().unwrap().contains("Rent control"));
    assert!(json["body"].as_str().unwrap().starts_with("Dear Maria Lopez"));

    let response = post_json_auth(
        app.clone(),
        "/api/emails/draft",
        json!({ "contactId": contact_id, "purpose": "bribe" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(app, "/api/emails/draft", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn review_falls_back_and_is_stored_on_article(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "review@example.com").await;
    let story_id = create_story(app.clone(), &token, "Night buses").await;

    let response = post_json_auth(
        app.clone(),
        "/api/articles",
        json!({ "storyId": story_id, "title": "Draft", "content": "Night buses are late." }),
        &token,
    )
    .await;
    let article_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/review",
        json!({ "articleId": article_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let review = body_json(response).await;
    assert_eq!(review["aiGenerated"], false);
    // Short and unquoted: 7 - 2 - 1.
    assert_eq!(review["overallScore"], 4);

    let response = get_auth(app.clone(), &format!("/api/articles/{article_id}"), &token).await;
    let article = body_json(response).await;
    assert_eq!(article["lastReview"]["overallScore"], 4);

    let response = post_json_auth(app, "/api/review", json!({ "content": "  " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
