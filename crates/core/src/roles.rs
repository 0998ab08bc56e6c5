//! Project-scoped role names stored on the `project_members` pivot.
//!
//! Roles are free-form labels up to [`MAX_ROLE_LENGTH`] characters. Only
//! [`ROLE_OWNER`] carries authority (editing the project and its roster).

use crate::error::CoreError;

/// Creator of a project; may edit, delete, and manage membership.
pub const ROLE_OWNER: &str = "owner";

/// Default role for members attached to a project.
pub const ROLE_MEMBER: &str = "member";

/// Maximum length of a role label.
pub const MAX_ROLE_LENGTH: usize = 50;

/// Resolve an optional requested role to the label that gets stored.
///
/// `None` and blank strings fall back to [`ROLE_MEMBER`].
pub fn resolve_role(requested: Option<&str>) -> Result<String, CoreError> {
    let role = match requested.map(str::trim) {
        None | Some("") => return Ok(ROLE_MEMBER.to_string()),
        Some(role) => role,
    };

    if role.chars().count() > MAX_ROLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Role must be at most {MAX_ROLE_LENGTH} characters"
        )));
    }

    Ok(role.to_string())
}

/// Whether the given pivot role grants owner privileges.
pub fn is_owner(role: &str) -> bool {
    role == ROLE_OWNER
}
