//! HTTP-level tests for registration, login, profile and bearer handling.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_json, post_json_auth, put_json_auth, register, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({ "email": "  Reporter@Example.COM ", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["email"], "reporter@example.com");
    assert_eq!(json["user"]["name"], "reporter");
    assert_eq!(json["user"]["calendarConnected"], false);
    assert!(json["user"].get("passwordHash").is_none());

    // Default settings are created alongside the account.
    let (settings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(settings, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_existing_email_case_insensitively(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "dup@example.com").await;

    let body = json!({ "email": "DUP@example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "An account with this email already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_registrations_with_one_email_yield_one_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "email": "race@example.com", "password": TEST_PASSWORD });

    let (first, second) = tokio::join!(
        post_json(app.clone(), "/api/auth/register", body.clone()),
        post_json(app, "/api/auth/register", body),
    );
    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let loser = if first.status() == StatusCode::BAD_REQUEST { first } else { second };
    assert_eq!(
        body_json(loser).await["error"],
        "An account with this email already exists"
    );

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_validates_email_and_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({ "email": "not-an-email", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "email": "short@example.com", "password": "abc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("at least 8 characters"));

    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_succeeds_with_any_email_case(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "desk@example.com").await;

    let body = json!({ "email": "Desk@Example.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["email"], "desk@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_email_look_identical(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "known@example.com").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "known@example.com", "password": "definitely-wrong" }),
    )
    .await;
    let unknown_email = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": "definitely-wrong" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_bearer_is_401_and_bad_token_is_403(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/stories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/stories", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_profile(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "me@example.com").await;

    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "me@example.com");
    assert!(json["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_email_taken_by_another_user_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "first@example.com").await;
    let token = register(app.clone(), "second@example.com").await;

    let response = put_json_auth(
        app.clone(),
        "/api/auth/me",
        json!({ "email": "FIRST@example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(app, "/api/auth/me", json!({ "name": "Second Reporter" }), &token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Second Reporter");
    assert_eq!(json["email"], "second@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "rotate@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "currentPassword": "wrong-password", "newPassword": "brand-new-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "brand-new-secret" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "rotate@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "rotate@example.com", "password": "brand-new-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
