//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::error::CoreError;
use pulse_core::project::validate_project_name;
use pulse_core::types::DbId;
use pulse_db::models::project::{CreateProject, Project, ProjectWithMembers, UpdateProject};
use pulse_db::repositories::{ProjectMemberRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{
    caller_member, require_project_member, require_project_owner,
};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// The caller becomes the project's owner.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectWithMembers>>)> {
    let member = caller_member(&state.pool, &auth_user).await?;
    let input = CreateProject {
        name: validate_project_name(&input.name)?,
        description: input.description,
    };

    let project = ProjectRepo::create(&state.pool, &input, auth_user.user_id, member.id).await?;
    tracing::info!(project_id = project.id, user_id = auth_user.user_id, "Project created");

    let body = with_members(&state, project).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Project created successfully", body)),
    ))
}

/// GET /api/v1/projects
///
/// Projects the caller belongs to, each with its roster.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<ProjectWithMembers>>>> {
    let member = caller_member(&state.pool, &auth_user).await?;
    let projects = ProjectRepo::list_for_member(&state.pool, member.id).await?;

    let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut rosters = ProjectMemberRepo::rosters_for_projects(&state.pool, &ids).await?;
    let projects = projects
        .into_iter()
        .map(|project| ProjectWithMembers {
            members: rosters.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect();
    Ok(Json(ApiResponse::data(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<ProjectWithMembers>>> {
    require_project_member(&state.pool, &auth_user, id).await?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?;
    Ok(Json(ApiResponse::data(with_members(&state, project).await?)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<ApiResponse<ProjectWithMembers>>> {
    require_project_owner(&state.pool, &auth_user, id).await?;
    let input = UpdateProject {
        name: input.name.as_deref().map(validate_project_name).transpose()?,
        description: input.description,
    };

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(ApiResponse::with_message(
        "Project updated successfully",
        with_members(&state, project).await?,
    )))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_project_owner(&state.pool, &auth_user, id).await?;
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Project", id).into());
    }
    tracing::info!(project_id = id, user_id = auth_user.user_id, "Project deleted");
    Ok(Json(ApiResponse::message("Project deleted successfully")))
}

async fn with_members(state: &AppState, project: Project) -> AppResult<ProjectWithMembers> {
    let members = ProjectMemberRepo::list_for_project(&state.pool, project.id).await?;
    Ok(ProjectWithMembers { project, members })
}
