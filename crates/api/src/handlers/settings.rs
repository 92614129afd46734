use axum::extract::State;
use storydesk_core::settings::{validate_theme, validate_timezone};
use storydesk_db::models::settings::{Settings, UpdateSettings};
use storydesk_db::repositories::SettingsRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn get(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Settings>> {
    let settings = SettingsRepo::get_or_create(&state.pool, auth.user_id).await?;
    Ok(Json(settings))
}

/// PUT /api/settings
///
/// Partial update; absent fields keep their value.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<UpdateSettings>,
) -> AppResult<Json<Settings>> {
    if let Some(theme) = &input.theme {
        validate_theme(theme).map_err(AppError::BadRequest)?;
    }
    if let Some(tz) = input.timezone.take() {
        validate_timezone(&tz).map_err(AppError::BadRequest)?;
        input.timezone = Some(tz.trim().to_string());
    }

    let settings = SettingsRepo::update(&state.pool, auth.user_id, &input).await?;
    tracing::debug!(user_id = auth.user_id, "Settings updated");
    Ok(Json(settings))
}
