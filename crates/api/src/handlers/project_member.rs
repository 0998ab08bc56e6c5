//! Handlers for a project's roster (`/projects/{id}/members`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::error::CoreError;
use pulse_core::roles::resolve_role;
use pulse_core::types::DbId;
use pulse_db::models::project_member::{
    AddProjectMember, ProjectMember, ProjectMemberDetail, RosterRemoval,
};
use pulse_db::repositories::{MemberRepo, ProjectMemberRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_project_member, require_project_owner};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/members
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<ProjectMemberDetail>>>> {
    require_project_member(&state.pool, &auth_user, project_id).await?;
    let roster = ProjectMemberRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::data(roster)))
}

/// POST /api/v1/projects/{id}/members
pub async fn add(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<AddProjectMember>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectMember>>)> {
    let access = require_project_owner(&state.pool, &auth_user, project_id).await?;
    let role = resolve_role(input.role.as_deref())?;

    if MemberRepo::find_by_id(&state.pool, input.member_id).await?.is_none() {
        return Err(CoreError::not_found("Member", input.member_id).into());
    }

    let pivot = ProjectMemberRepo::add(&state.pool, project_id, input.member_id, &role).await?;
    tracing::info!(
        project_id,
        member_id = input.member_id,
        role = %role,
        added_by = access.member_id,
        "Member added to project"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Member added to project", pivot)),
    ))
}

/// DELETE /api/v1/projects/{id}/members/{member_id}
///
/// A project always keeps at least one owner. Tasks of this project
/// assigned to the removed member become unassigned.
pub async fn remove(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let access = require_project_owner(&state.pool, &auth_user, project_id).await?;

    match ProjectMemberRepo::remove_from_project(&state.pool, project_id, member_id).await? {
        RosterRemoval::Removed { unassigned } => {
            tracing::info!(
                project_id,
                member_id,
                removed_by = access.member_id,
                unassigned,
                "Member removed from project"
            );
            Ok(Json(ApiResponse::message("Member removed from project")))
        }
        RosterRemoval::NotOnProject => Err(CoreError::not_found("ProjectMember", member_id).into()),
        RosterRemoval::LastOwner => Err(AppError::Core(CoreError::Conflict(
            "Cannot remove the last owner of a project".into(),
        ))),
    }
}
