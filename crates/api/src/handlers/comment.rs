//! Handlers for task comment threads (`/tasks/{id}/comments`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::board::Comment;
use pulse_core::error::CoreError;
use pulse_core::types::EntityUuid;
use pulse_db::repositories::{BoardRepo, CommentRepo, TaskRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::require_project_member;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /tasks/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// GET /api/v1/tasks/{id}/comments
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(task_id): Path<EntityUuid>,
) -> AppResult<Json<ApiResponse<Vec<Comment>>>> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;
    require_project_member(&state.pool, &auth_user, task.project_id).await?;

    let comments = CommentRepo::list_for_task(&state.pool, task_id)
        .await?
        .into_iter()
        .map(Comment::from)
        .collect();
    Ok(Json(ApiResponse::data(comments)))
}

/// POST /api/v1/tasks/{id}/comments
pub async fn add(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(task_id): Path<EntityUuid>,
    AppJson(input): AppJson<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;
    require_project_member(&state.pool, &auth_user, task.project_id).await?;

    let mut board = BoardRepo::load(&state.pool, task.project_id).await?;
    let comment = board
        .add_comment(task_id, &auth_user.actor(), &input.text, pulse_db::now())?
        .clone();
    BoardRepo::insert_comment(&state.pool, &comment).await?;
    tracing::info!(task_id = %task_id, comment_id = %comment.id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Comment added", comment)),
    ))
}
