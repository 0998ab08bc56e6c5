//! Project field validation.

use crate::error::CoreError;

/// Maximum length of a project name.
pub const MAX_PROJECT_NAME_LENGTH: usize = 255;

/// Validate and normalize a project name. Returns the trimmed name.
pub fn validate_project_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Project name is required".into()));
    }
    if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_PROJECT_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}
