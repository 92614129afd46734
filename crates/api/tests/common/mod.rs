#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storydesk_ai::{AiConfig, AiService};
use storydesk_api::auth::jwt::JwtConfig;
use storydesk_api::config::ServerConfig;
use storydesk_api::router::build_app_router;
use storydesk_api::state::AppState;
use storydesk_calendar::{GoogleCalendarClient, GoogleOAuthConfig};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with a fixed JWT secret and no AI or calendar
/// providers.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-do-not-use-in-production".to_string(),
            expiry_days: 7,
        },
        ai: AiConfig::default(),
        google: None,
    }
}

/// Build the full application router around `pool` with the given AI service.
pub fn build_test_app_with_ai(pool: PgPool, ai: AiService) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ai: Arc::new(ai),
        calendar: None,
    };
    build_app_router(state, &config)
}

/// Build the application router with a Google Calendar client configured.
///
/// Only endpoints that answer before contacting Google are usable in tests.
pub fn build_test_app_with_calendar(pool: PgPool) -> Router {
    let config = test_config();
    let calendar = GoogleCalendarClient::new(GoogleOAuthConfig {
        client_id: "test-client.apps.googleusercontent.com".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://localhost:5173/settings/calendar".to_string(),
    })
    .unwrap();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ai: Arc::new(AiService::default()),
        calendar: Some(Arc::new(calendar)),
    };
    build_app_router(state, &config)
}

/// Build the full application router with no external integrations.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_ai(pool, AiService::default())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return their bearer token.
pub async fn register(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["token"]
        .as_str()
        .expect("register returns a token")
        .to_string()
}

/// Create a story for the token's owner and return its id.
pub async fn create_story(app: Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/stories",
        serde_json::json!({ "title": title }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a contact for the token's owner and return its id.
pub async fn create_contact(app: Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/contacts",
        serde_json::json!({ "name": name, "organization": "City Hall", "role": "Clerk" }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
