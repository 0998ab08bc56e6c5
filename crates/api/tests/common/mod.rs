#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use pulse_api::auth::jwt::JwtConfig;
use pulse_api::config::{AuthConfig, ServerConfig};
use pulse_api::router::build_app_router;
use pulse_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Reset tokens are returned in the response body so the reset flow can be
/// driven end to end.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        auth: AuthConfig {
            expose_reset_token: true,
            ..AuthConfig::default()
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A registered user as seen by tests.
pub struct TestUser {
    pub user_id: i64,
    pub member_id: i64,
    pub token: String,
    pub refresh_token: String,
}

/// Register through the API and return the issued tokens.
pub async fn register_user(app: Router, name: &str, email: &str) -> TestUser {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": TEST_PASSWORD,
        "password_confirmation": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/register", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    TestUser {
        user_id: data["user"]["id"].as_i64().unwrap(),
        member_id: data["user"]["member_id"].as_i64().unwrap(),
        token: data["access_token"].as_str().unwrap().to_string(),
        refresh_token: data["refresh_token"].as_str().unwrap().to_string(),
    }
}

/// Create a project owned by `owner` and return its id.
pub async fn create_project(app: Router, owner: &TestUser, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name, "description": "test project" });
    let response = post_json_auth(app, "/api/v1/projects", body, &owner.token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add `member_id` to a project's roster as a plain member.
pub async fn add_to_project(app: Router, owner: &TestUser, project_id: i64, member_id: i64) {
    let body = serde_json::json!({ "member_id": member_id });
    let uri = format!("/api/v1/projects/{project_id}/members");
    let response = post_json_auth(app, &uri, body, &owner.token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}
