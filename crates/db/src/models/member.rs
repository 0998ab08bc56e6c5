//! Member entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

/// A member row from the `members` table.
///
/// Members are the people tasks get assigned to. A member may be linked to
/// a user account through `user_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    /// Global role label (e.g. "Designer"); unrelated to project roles.
    pub role: Option<String>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// DTO for updating an existing member. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
