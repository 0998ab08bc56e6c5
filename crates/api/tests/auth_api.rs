//! HTTP-level integration tests for registration, sessions and the
//! password lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, register_user, TEST_PASSWORD};
use sqlx::PgPool;

fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering returns 201 with tokens and a user linked to a member row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Ada Lovelace",
        "email": "Ada@Example.com",
        "password": TEST_PASSWORD,
        "password_confirmation": TEST_PASSWORD,
    });

    let response = post_json(app, "/api/v1/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert!(json["data"]["access_token"].is_string());
    assert!(json["data"]["refresh_token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "ada@example.com");
    assert!(json["data"]["user"]["member_id"].is_number());
}

/// A second registration with the same email is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "First", "dup@example.com").await;

    let body = serde_json::json!({
        "name": "Second",
        "email": "dup@example.com",
        "password": TEST_PASSWORD,
        "password_confirmation": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "CONFLICT");
}

/// Mismatched confirmation and short passwords are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_password_rules(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mismatch = serde_json::json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": TEST_PASSWORD,
        "password_confirmation": "something-else",
    });
    let response = post_json(app.clone(), "/api/v1/register", mismatch).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short = serde_json::json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "short",
        "password_confirmation": "short",
    });
    let response = post_json(app, "/api/v1/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// Login succeeds with the right password and fails with 401 otherwise.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Carol", "carol@example.com").await;

    let response = post_json(
        app.clone(),
        "/api/v1/login",
        login_body("CAROL@example.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.user_id);
    assert_eq!(json["data"]["user"]["member_id"], user.member_id);

    let response = post_json(
        app.clone(),
        "/api/v1/login",
        login_body("carol@example.com", "wrong-password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(app, "/api/v1/login", login_body("ghost@example.com", "x")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A refresh token can be exchanged once; replaying it fails.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Dan", "dan@example.com").await;
    let body = serde_json::json!({ "refresh_token": user.refresh_token });

    let response = post_json(app.clone(), "/api/v1/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["data"]["refresh_token"], body["refresh_token"]);

    let response = post_json(app, "/api/v1/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes refresh sessions and requires a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Eve", "eve@example.com").await;

    let response = post_json(app.clone(), "/api/v1/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response =
        post_json_auth(app.clone(), "/api/v1/logout", serde_json::json!({}), &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "refresh_token": user.refresh_token });
    let response = post_json(app, "/api/v1/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /user returns the caller's profile; an invalid token is 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_current_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Fay", "fay@example.com").await;

    let response = get_auth(app.clone(), "/api/v1/user", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Fay");
    assert_eq!(json["data"]["member_id"], user.member_id);

    let response = get(app.clone(), "/api/v1/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/user", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Password lifecycle
// ---------------------------------------------------------------------------

/// forgot-password answers success for unknown emails without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_forgot_password_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "nobody@example.com" });

    let response = post_json(app, "/api/v1/forgot-password", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert!(json.get("data").is_none());
}

/// A reset token sets a new password once and revokes existing sessions.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_password_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Gus", "gus@example.com").await;

    let response = post_json(
        app.clone(),
        "/api/v1/forgot-password",
        serde_json::json!({ "email": "gus@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["data"]["reset_token"]
        .as_str()
        .unwrap()
        .to_string();

    let reset = serde_json::json!({
        "token": token,
        "email": "gus@example.com",
        "password": "a-brand-new-password",
        "password_confirmation": "a-brand-new-password",
    });
    let response = post_json(app.clone(), "/api/v1/reset-password", reset.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Single use.
    let response = post_json(app.clone(), "/api/v1/reset-password", reset).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/refresh",
        serde_json::json!({ "refresh_token": user.refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app.clone(),
        "/api/v1/login",
        login_body("gus@example.com", TEST_PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app,
        "/api/v1/login",
        login_body("gus@example.com", "a-brand-new-password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A made-up reset token is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_password_bad_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "Hal", "hal@example.com").await;

    let reset = serde_json::json!({
        "token": "definitely-not-issued",
        "email": "hal@example.com",
        "password": "a-brand-new-password",
        "password_confirmation": "a-brand-new-password",
    });
    let response = post_json(app, "/api/v1/reset-password", reset).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// update-password requires the current password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register_user(app.clone(), "Ivy", "ivy@example.com").await;

    let wrong = serde_json::json!({
        "current_password": "not-my-password",
        "password": "another-password",
        "password_confirmation": "another-password",
    });
    let response =
        post_json_auth(app.clone(), "/api/v1/update-password", wrong, &user.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let right = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "password": "another-password",
        "password_confirmation": "another-password",
    });
    let response =
        post_json_auth(app.clone(), "/api/v1/update-password", right, &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/v1/login",
        login_body("ivy@example.com", "another-password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
