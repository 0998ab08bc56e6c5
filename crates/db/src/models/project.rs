//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

use crate::models::project_member::ProjectMemberDetail;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// User who created the project.
    pub creator_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with its member roster.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithMembers {
    #[serde(flatten)]
    pub project: Project,
    pub members: Vec<ProjectMemberDetail>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}
