//! Project-scoped authorization.
//!
//! Access is decided by the caller's member row and its role on the
//! `project_members` pivot. Unlike [`super::auth::AuthUser`] these are plain
//! async guards, since the project id comes from different path shapes.

use pulse_core::error::CoreError;
use pulse_core::roles::is_owner;
use pulse_core::types::DbId;
use pulse_db::models::member::Member;
use pulse_db::repositories::{MemberRepo, ProjectMemberRepo, ProjectRepo};
use pulse_db::DbPool;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};

/// A caller that passed a project access check.
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    /// The caller's member row id.
    pub member_id: DbId,
    /// The caller's role on the project.
    pub role: String,
}

/// The member row linked to the authenticated account.
pub async fn caller_member(pool: &DbPool, user: &AuthUser) -> AppResult<Member> {
    MemberRepo::find_by_user_id(pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No member profile is linked to this account".into(),
            ))
        })
}

/// Require the caller to belong to the project.
///
/// 404 if the project does not exist, 403 if the caller is not on it.
pub async fn require_project_member(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> AppResult<ProjectAccess> {
    if ProjectRepo::find_by_id(pool, project_id).await?.is_none() {
        return Err(CoreError::not_found("Project", project_id).into());
    }

    let member = caller_member(pool, user).await?;
    let role = ProjectMemberRepo::find_role(pool, project_id, member.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "You are not a member of this project".into(),
            ))
        })?;

    Ok(ProjectAccess {
        member_id: member.id,
        role,
    })
}

/// Require the caller to own the project.
pub async fn require_project_owner(
    pool: &DbPool,
    user: &AuthUser,
    project_id: DbId,
) -> AppResult<ProjectAccess> {
    let access = require_project_member(pool, user, project_id).await?;
    if !is_owner(&access.role) {
        tracing::debug!(
            user_id = user.user_id,
            project_id,
            role = %access.role,
            "Owner check failed"
        );
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner can do this".into(),
        )));
    }
    Ok(access)
}
