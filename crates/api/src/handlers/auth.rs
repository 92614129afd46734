//! Handlers for the `/auth` resource (register, login, profile, password).

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use storydesk_core::error::CoreError;
use storydesk_core::validation::require_text_if_present;
use storydesk_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use storydesk_db::repositories::UserRepo;
use validator::{Validate, ValidationErrors};

use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_dummy, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Same body for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "An account with this email already exists";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `PUT /auth/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account (with default settings) and sign it in.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.email = input.email.trim().to_lowercase();
    input.validate().map_err(validation_error)?;

    if UserRepo::find_by_email_case_insensitive(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
    }

    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_display_name(&input.email));

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create_with_settings(
        &state.pool,
        &CreateUser {
            email: input.email,
            name,
            password_hash,
        },
    )
    .await
    .map_err(|err| match &err {
        // A concurrent registration won the insert after our lookup.
        sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email") => {
            AppError::BadRequest(EMAIL_TAKEN.into())
        }
        _ => AppError::Database(err),
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    // Exact match on the normalised email first; older rows may carry mixed case.
    let user = match UserRepo::find_by_email(&state.pool, &email).await? {
        Some(user) => Some(user),
        None => UserRepo::find_by_email_case_insensitive(&state.pool, &email).await?,
    };

    let Some(user) = user else {
        verify_dummy(&input.password);
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/me
///
/// Update display name and/or email.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    input.email = input.email.map(|e| e.trim().to_lowercase());
    input.validate().map_err(validation_error)?;
    let name = require_text_if_present("Name", input.name.as_deref()).map_err(AppError::BadRequest)?;

    if let Some(email) = &input.email {
        if let Some(other) = UserRepo::find_by_email_case_insensitive(&state.pool, email).await? {
            if other.id != auth.user_id {
                return Err(AppError::Core(CoreError::Conflict(EMAIL_TAKEN.into())));
            }
        }
    }

    let user = UserRepo::update(
        &state.pool,
        auth.user_id,
        &UpdateUser {
            email: input.email,
            name,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found("User", auth.user_id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/auth/change-password
///
/// Requires the current password. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = find_user(&state, auth.user_id).await?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: storydesk_core::types::DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", id)))
}

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

/// The local part of the address, used when no name is given.
fn default_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// First validation message, by field name for a stable order.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    let message = fields
        .first()
        .and_then(|(_, errs)| errs.first())
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Invalid request".to_string());
    AppError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_from_email() {
        assert_eq!(default_display_name("jane.doe@example.com"), "jane.doe");
    }

    #[test]
    fn register_validation_messages() {
        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            password: "long-enough".into(),
            name: None,
        };
        let err = validation_error(bad_email.validate().unwrap_err());
        assert!(matches!(err, AppError::BadRequest(m) if m == "A valid email address is required"));

        let short_password = RegisterRequest {
            email: "a@example.com".into(),
            password: "short".into(),
            name: None,
        };
        let err = validation_error(short_password.validate().unwrap_err());
        assert!(
            matches!(err, AppError::BadRequest(m) if m == "Password must be at least 8 characters long")
        );
    }
}
