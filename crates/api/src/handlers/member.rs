//! Handlers for the `/members` directory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pulse_core::error::CoreError;
use pulse_core::member::{validate_name, validate_optional_email, validate_role_label};
use pulse_core::types::DbId;
use pulse_db::models::member::{CreateMember, Member, UpdateMember};
use pulse_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/members
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(input): AppJson<CreateMember>,
) -> AppResult<(StatusCode, Json<ApiResponse<Member>>)> {
    let input = CreateMember {
        name: validate_name(&input.name)?,
        email: validate_optional_email(input.email.as_deref())?,
        role: validate_role_label(input.role.as_deref())?,
    };
    let member = MemberRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Member created successfully", member)),
    ))
}

/// GET /api/v1/members
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Member>>>> {
    let members = MemberRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(members)))
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Member>>> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Member", id)))?;
    Ok(Json(ApiResponse::data(member)))
}

/// PUT /api/v1/members/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateMember>,
) -> AppResult<Json<ApiResponse<Member>>> {
    let input = UpdateMember {
        name: input.name.as_deref().map(validate_name).transpose()?,
        email: validate_optional_email(input.email.as_deref())?,
        role: validate_role_label(input.role.as_deref())?,
    };
    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Member", id)))?;
    Ok(Json(ApiResponse::with_message("Member updated successfully", member)))
}

/// DELETE /api/v1/members/{id}
///
/// Members linked to an account cannot be deleted.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Member", id)))?;
    if member.user_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Member is linked to a user account and cannot be deleted".into(),
        )));
    }

    MemberRepo::delete(&state.pool, id).await?;
    tracing::info!(member_id = id, "Member deleted");
    Ok(Json(ApiResponse::message("Member deleted successfully")))
}
