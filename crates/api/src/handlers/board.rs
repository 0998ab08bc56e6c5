//! Handlers for the kanban board (`/projects/{id}/board`).
//!
//! Each mutation loads the project's board, applies a single board
//! operation, and persists the task that changed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use pulse_core::board::{Buckets, MemberRef, Task, TaskBoard, TaskDraft, TaskEdit};
use pulse_core::error::CoreError;
use pulse_core::task::{TaskPriority, TaskStatus};
use pulse_core::types::{DbId, EntityUuid};
use pulse_db::repositories::{BoardRepo, ProjectMemberRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::task::ensure_assignee_on_project;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::require_project_member;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string for `GET /projects/{id}/board`.
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    /// Show only tasks assigned to this member.
    pub member_id: Option<DbId>,
}

/// The board as rendered for clients.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub project_id: DbId,
    /// Lookup table for resolving `assignee_id` to a name.
    pub members: Vec<MemberRef>,
    /// The member filter that was applied, if any.
    pub member_id: Option<DbId>,
    pub buckets: Buckets,
}

/// Request body for `POST /projects/{id}/board/tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateBoardTaskRequest {
    pub title: String,
    pub description: String,
    /// Target column; defaults to `backlog`.
    pub status: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /projects/{id}/board/tasks/{task_id}`.
///
/// A complete record: omitted optional fields are cleared.
#[derive(Debug, Deserialize)]
pub struct EditBoardTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `POST /projects/{id}/board/move`.
#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub task_id: EntityUuid,
    pub from: String,
    pub to: String,
}

/// Request body for `POST /projects/{id}/board/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    pub task_id: EntityUuid,
    /// `null` or absent clears the assignee.
    pub member_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/board
pub async fn get_board(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(query): Query<BoardQuery>,
) -> AppResult<Json<ApiResponse<BoardView>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;

    let board = BoardRepo::load(&state.pool, project_id).await?;
    let members = ProjectMemberRepo::list_member_refs(&state.pool, project_id).await?;

    let buckets = match query.member_id {
        Some(member_id) => board.filter_by_member(member_id, &members),
        None => board.buckets,
    };

    Ok(Json(ApiResponse::data(BoardView {
        project_id,
        members,
        member_id: query.member_id,
        buckets,
    })))
}

/// POST /api/v1/projects/{id}/board/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateBoardTaskRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Task>>)> {
    require_project_member(&state.pool, &auth_user, project_id).await?;

    let target = input
        .status
        .as_deref()
        .map(TaskStatus::parse)
        .transpose()?
        .unwrap_or(TaskStatus::Backlog);
    let priority = input.priority.as_deref().map(TaskPriority::parse).transpose()?;
    ensure_assignee_on_project(&state.pool, project_id, input.assignee_id).await?;

    let draft = TaskDraft {
        title: input.title,
        description: input.description,
        priority,
        assignee_id: input.assignee_id,
        due_date: input.due_date,
        tags: input.tags,
    };

    let mut board = load_board(&state, project_id).await?;
    let task = board
        .create_task(draft, target, &auth_user.actor(), pulse_db::now())?
        .clone();
    BoardRepo::save_task(&state.pool, &task).await?;
    tracing::info!(task_id = %task.id, project_id, status = %target, "Board task created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Task created successfully", task)),
    ))
}

/// PUT /api/v1/projects/{id}/board/tasks/{task_id}
///
/// Replaces the task's editable fields. The task keeps its column.
pub async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, EntityUuid)>,
    AppJson(input): AppJson<EditBoardTaskRequest>,
) -> AppResult<Json<ApiResponse<Task>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;

    let edit = TaskEdit {
        title: input.title,
        description: input.description,
        priority: TaskPriority::parse(&input.priority)?,
        assignee_id: input.assignee_id,
        due_date: input.due_date,
        tags: input.tags,
    };
    ensure_assignee_on_project(&state.pool, project_id, edit.assignee_id).await?;

    let mut board = load_board(&state, project_id).await?;
    let task = board.update_task(task_id, edit, pulse_db::now())?.clone();
    BoardRepo::save_task(&state.pool, &task).await?;

    Ok(Json(ApiResponse::with_message("Task updated successfully", task)))
}

/// POST /api/v1/projects/{id}/board/move
///
/// Moving to the column the task is already in changes nothing and
/// returns no `data`.
pub async fn move_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<MoveTaskRequest>,
) -> AppResult<Json<ApiResponse<Task>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;
    let from = TaskStatus::parse(&input.from)?;
    let to = TaskStatus::parse(&input.to)?;

    let mut board = load_board(&state, project_id).await?;
    let Some(task) = board.move_task(input.task_id, from, to)?.cloned() else {
        return Ok(Json(ApiResponse {
            status: "success",
            message: Some("Task is already in that column".into()),
            data: None,
        }));
    };

    BoardRepo::save_task(&state.pool, &task).await?;
    tracing::info!(task_id = %task.id, project_id, %from, %to, "Task moved");
    Ok(Json(ApiResponse::with_message("Task moved successfully", task)))
}

/// POST /api/v1/projects/{id}/board/assign
pub async fn assign_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<AssignTaskRequest>,
) -> AppResult<Json<ApiResponse<Task>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;

    let members = ProjectMemberRepo::list_member_refs(&state.pool, project_id).await?;
    let assignee = match input.member_id {
        Some(member_id) => {
            let found = members.iter().find(|m| m.id == member_id).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Member {member_id} is not a member of this project"
                )))
            })?;
            Some(found)
        }
        None => None,
    };

    let mut board = load_board(&state, project_id).await?;
    let task = board.assign_task(input.task_id, assignee)?.clone();
    BoardRepo::save_task(&state.pool, &task).await?;
    tracing::info!(
        task_id = %task.id,
        project_id,
        assignee_id = ?task.assignee_id,
        "Task assigned"
    );

    Ok(Json(ApiResponse::with_message("Task assigned successfully", task)))
}

async fn load_board(state: &AppState, project_id: DbId) -> AppResult<TaskBoard> {
    Ok(BoardRepo::load(&state.pool, project_id).await?)
}
