//! Handler for the current-user profile.

use axum::extract::State;
use axum::Json;
use pulse_core::error::CoreError;
use pulse_db::models::user::UserResponse;
use pulse_db::repositories::{MemberRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/user
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let member_id = MemberRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .map(|m| m.id);
    Ok(Json(ApiResponse::data(UserResponse::new(&user, member_id))))
}
