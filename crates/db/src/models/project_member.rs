//! Project membership pivot model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

/// A row from the `project_members` pivot table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub member_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pivot row joined with the member it points at.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMemberDetail {
    pub member_id: DbId,
    pub name: String,
    pub email: Option<String>,
    /// Project-scoped role from the pivot.
    pub role: String,
    pub joined_at: Timestamp,
}

/// A roster entry tagged with its project, for loading several rosters at once.
#[derive(Debug, Clone, FromRow)]
pub struct RosterEntry {
    pub project_id: DbId,
    #[sqlx(flatten)]
    pub member: ProjectMemberDetail,
}

/// Result of [`crate::repositories::ProjectMemberRepo::remove_from_project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterRemoval {
    /// The member left the roster; `unassigned` of their tasks lost their assignee.
    Removed { unassigned: u64 },
    NotOnProject,
    /// Refused: the member is the project's only owner.
    LastOwner,
}

/// DTO for attaching a member to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct AddProjectMember {
    pub member_id: DbId,
    pub role: Option<String>,
}
