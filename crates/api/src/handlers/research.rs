//! Handlers for the `/research` resource, including AI search.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use storydesk_ai::types::{SearchResult, StoryContext};
use storydesk_ai::AiError;
use storydesk_core::error::CoreError;
use storydesk_core::types::DbId;
use storydesk_core::validation::require_query;
use storydesk_db::models::research::{CreateResearch, Research, UpdateResearch};
use storydesk_db::repositories::{ResearchRepo, StoryRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::handlers::require_story;
use crate::middleware::auth::AuthUser;
use crate::query::StoryFilter;
use crate::state::AppState;

/// Request body for `POST /research/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub story_id: Option<DbId>,
    /// Persist the answer as a research note (default: `true`).
    pub save: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub result: SearchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<Research>,
}

fn validate_sources(sources: Option<&serde_json::Value>) -> AppResult<()> {
    match sources {
        Some(v) if !v.is_array() => Err(AppError::BadRequest("sources must be an array".into())),
        _ => Ok(()),
    }
}

/// POST /api/research
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreateResearch>,
) -> AppResult<(StatusCode, Json<Research>)> {
    input.query = require_query(&input.query).map_err(AppError::BadRequest)?;
    validate_sources(input.sources.as_ref())?;
    if let Some(story_id) = input.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }

    let research = ResearchRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(research_id = research.id, user_id = auth.user_id, "Research created");
    Ok((StatusCode::CREATED, Json(research)))
}

/// GET /api/research
///
/// Optional `?storyId=` narrows to one story.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<StoryFilter>,
) -> AppResult<Json<Vec<Research>>> {
    if let Some(story_id) = filter.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }
    let research = ResearchRepo::list(&state.pool, auth.user_id, filter.story_id).await?;
    Ok(Json(research))
}

/// GET /api/research/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Research>> {
    let research = ResearchRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Research", id)))?;
    Ok(Json(research))
}

/// PUT /api/research/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateResearch>,
) -> AppResult<Json<Research>> {
    input.query = input
        .query
        .as_deref()
        .map(require_query)
        .transpose()
        .map_err(AppError::BadRequest)?;
    validate_sources(input.sources.as_ref())?;
    if let Some(Some(story_id)) = input.story_id {
        require_story(&state.pool, story_id, auth.user_id).await?;
    }

    let research = ResearchRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Research", id)))?;
    Ok(Json(research))
}

/// DELETE /api/research/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ResearchRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Research", id)))
    }
}

/// POST /api/research/search
///
/// Ask the search provider. 503 when none is configured, 500 when the
/// provider fails. The answer is saved as a research note unless
/// `save` is `false`.
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let query = require_query(&input.query).map_err(AppError::BadRequest)?;
    if !state.ai.search_available() {
        return Err(AppError::ServiceUnavailable(
            "Research search is not configured".into(),
        ));
    }

    let story = match input.story_id {
        Some(story_id) => Some(
            StoryRepo::find_for_user(&state.pool, story_id, auth.user_id)
                .await?
                .ok_or(AppError::Core(CoreError::not_found("Story", story_id)))?,
        ),
        None => None,
    };
    let context = story.map(|s| StoryContext {
        title: s.title,
        description: s.description,
    });

    let result = state
        .ai
        .search(&query, context.as_ref())
        .await
        .map_err(|e| match e {
            AiError::NotConfigured => {
                AppError::ServiceUnavailable("Research search is not configured".into())
            }
            other => AppError::InternalError(format!("Research search failed: {other}")),
        })?;

    let research = if input.save.unwrap_or(true) {
        let saved = ResearchRepo::create(
            &state.pool,
            auth.user_id,
            &CreateResearch {
                query,
                story_id: input.story_id,
                result: Some(result.result.clone()),
                sources: Some(serde_json::json!(result.sources)),
                notes: None,
            },
        )
        .await?;
        tracing::info!(research_id = saved.id, user_id = auth.user_id, "Search result saved");
        Some(saved)
    } else {
        None
    };

    Ok(Json(SearchResponse { result, research }))
}
