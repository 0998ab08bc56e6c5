//! Handlers for the `/tasks` resource and `/projects/{id}/tasks`.
//!
//! These are plain CRUD endpoints over task rows. Status and priority are
//! parsed strictly, and an assignee must be on the task's project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use pulse_core::board::Comment;
use pulse_core::error::CoreError;
use pulse_core::task::{normalize_tags, validate_title, TaskPriority, TaskStatus};
use pulse_core::types::{DbId, EntityUuid};
use pulse_db::models::task::{CreateTask, TaskWithAssignee, UpdateTask};
use pulse_db::repositories::{CommentRepo, ProjectMemberRepo, TaskRepo};
use pulse_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{caller_member, require_project_member};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /tasks/{id}`. Every field is replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A task with its assignee name and comment thread.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: TaskWithAssignee,
    pub comments: Vec<Comment>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks
///
/// Tasks across every project the caller belongs to.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<TaskWithAssignee>>>> {
    let member = caller_member(&state.pool, &auth_user).await?;
    let tasks = TaskRepo::list_for_member(&state.pool, member.id).await?;
    Ok(Json(ApiResponse::data(tasks)))
}

/// GET /api/v1/projects/{id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<TaskWithAssignee>>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;
    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::data(tasks)))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TaskWithAssignee>>)> {
    require_project_member(&state.pool, &auth_user, input.project_id).await?;

    let create = CreateTask {
        project_id: input.project_id,
        title: validate_title(&input.title)?,
        description: input.description.unwrap_or_default().trim().to_string(),
        status: TaskStatus::parse(&input.status)?,
        priority: TaskPriority::parse(&input.priority)?,
        assignee_id: input.assignee_id,
        due_date: input.due_date,
        tags: normalize_tags(&input.tags)?,
    };
    ensure_assignee_on_project(&state.pool, create.project_id, create.assignee_id).await?;

    let row = TaskRepo::create(&state.pool, auth_user.user_id, &create).await?;
    tracing::info!(task_id = %row.id, project_id = row.project_id, "Task created");

    let task = find_with_assignee(&state.pool, row.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Task created successfully", task)),
    ))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EntityUuid>,
) -> AppResult<Json<ApiResponse<TaskDetail>>> {
    let task = find_with_assignee(&state.pool, id).await?;
    require_project_member(&state.pool, &auth_user, task.project_id).await?;

    let comments = CommentRepo::list_for_task(&state.pool, id)
        .await?
        .into_iter()
        .map(Comment::from)
        .collect();
    Ok(Json(ApiResponse::data(TaskDetail { task, comments })))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EntityUuid>,
    AppJson(input): AppJson<UpdateTaskRequest>,
) -> AppResult<Json<ApiResponse<TaskWithAssignee>>> {
    let existing = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", id))?;
    require_project_member(&state.pool, &auth_user, existing.project_id).await?;

    let update = UpdateTask {
        title: validate_title(&input.title)?,
        description: input.description.unwrap_or_default().trim().to_string(),
        status: TaskStatus::parse(&input.status)?,
        priority: TaskPriority::parse(&input.priority)?,
        assignee_id: input.assignee_id,
        due_date: input.due_date,
        tags: normalize_tags(&input.tags)?,
    };
    ensure_assignee_on_project(&state.pool, existing.project_id, update.assignee_id).await?;

    TaskRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;

    let task = find_with_assignee(&state.pool, id).await?;
    Ok(Json(ApiResponse::with_message("Task updated successfully", task)))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EntityUuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let existing = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", id))?;
    require_project_member(&state.pool, &auth_user, existing.project_id).await?;

    TaskRepo::delete(&state.pool, id).await?;
    tracing::info!(task_id = %id, "Task deleted");
    Ok(Json(ApiResponse::message("Task deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_with_assignee(pool: &DbPool, id: EntityUuid) -> AppResult<TaskWithAssignee> {
    TaskRepo::find_with_assignee(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", id).into())
}

/// Reject an assignee that is not on the project's roster.
pub(crate) async fn ensure_assignee_on_project(
    pool: &DbPool,
    project_id: DbId,
    assignee_id: Option<DbId>,
) -> AppResult<()> {
    let Some(member_id) = assignee_id else {
        return Ok(());
    };
    if ProjectMemberRepo::find_role(pool, project_id, member_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Assignee {member_id} is not a member of this project"
        ))));
    }
    Ok(())
}
