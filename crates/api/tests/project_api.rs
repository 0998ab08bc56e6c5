//! HTTP-level integration tests for projects and project rosters.

mod common;

use axum::http::StatusCode;
use common::{
    add_to_project, body_json, create_project, delete_auth, get_auth, post_json_auth,
    put_json_auth, register_user,
};
use sqlx::PgPool;

/// The creator is attached as owner and the project appears in their list.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_makes_creator_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;

    let body = serde_json::json!({ "name": "  Apollo  ", "description": "moonshot" });
    let response = post_json_auth(app.clone(), "/api/v1/projects", body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["name"], "Apollo");
    assert_eq!(data["creator_id"], owner.user_id);
    assert_eq!(data["members"][0]["member_id"], owner.member_id);
    assert_eq!(data["members"][0]["role"], "owner");

    let response = get_auth(app, "/api/v1/projects", &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    let listed = &json["data"][0];
    assert_eq!(listed["name"], "Apollo");
    assert_eq!(listed["members"][0]["member_id"], owner.member_id);
    assert_eq!(listed["members"][0]["name"], "Owner");
    assert_eq!(listed["members"][0]["role"], "owner");
}

/// A blank project name is a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;

    let body = serde_json::json!({ "name": "   " });
    let response = post_json_auth(app, "/api/v1/projects", body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Users only see and open projects they belong to.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_visibility(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;
    let outsider = register_user(app.clone(), "Outsider", "out@example.com").await;
    let project_id = create_project(app.clone(), &owner, "Private").await;

    let response = get_auth(app.clone(), "/api/v1/projects", &outsider.token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let uri = format!("/api/v1/projects/{project_id}");
    let response = get_auth(app.clone(), &uri, &outsider.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/projects/999999", &owner.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Only owners may update or delete a project.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_only_mutations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;
    let member = register_user(app.clone(), "Member", "member@example.com").await;
    let project_id = create_project(app.clone(), &owner, "Shared").await;
    add_to_project(app.clone(), &owner, project_id, member.member_id).await;
    let uri = format!("/api/v1/projects/{project_id}");

    let rename = serde_json::json!({ "name": "Renamed" });
    let response = put_json_auth(app.clone(), &uri, rename.clone(), &member.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, rename, &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["description"], "test project");

    let response = delete_auth(app.clone(), &uri, &member.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &owner.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Roster management: add, duplicate add, list, remove.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_roster_management(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;
    let member = register_user(app.clone(), "Member", "member@example.com").await;
    let project_id = create_project(app.clone(), &owner, "Team").await;
    let roster_uri = format!("/api/v1/projects/{project_id}/members");

    add_to_project(app.clone(), &owner, project_id, member.member_id).await;

    let again = serde_json::json!({ "member_id": member.member_id });
    let response = post_json_auth(app.clone(), &roster_uri, again, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let missing = serde_json::json!({ "member_id": 999999 });
    let response = post_json_auth(app.clone(), &roster_uri, missing, &owner.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &roster_uri, &member.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let uri = format!("{roster_uri}/{}", member.member_id);
    let response = delete_auth(app.clone(), &uri, &owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/v1/projects/{project_id}"), &member.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The last owner cannot be removed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_remove_last_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;
    let project_id = create_project(app.clone(), &owner, "Solo").await;

    let uri = format!("/api/v1/projects/{project_id}/members/{}", owner.member_id);
    let response = delete_auth(app, &uri, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A second owner makes removing the first one possible.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_remove_owner_with_co_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_user(app.clone(), "Owner", "owner@example.com").await;
    let co_owner = register_user(app.clone(), "Co", "co@example.com").await;
    let project_id = create_project(app.clone(), &owner, "Pair").await;

    let body = serde_json::json!({ "member_id": co_owner.member_id, "role": "owner" });
    let uri = format!("/api/v1/projects/{project_id}/members");
    let response = post_json_auth(app.clone(), &uri, body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/projects/{project_id}/members/{}", owner.member_id);
    let response = delete_auth(app, &uri, &co_owner.token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
