//! Member and account field validation (names, emails).

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::roles::MAX_ROLE_LENGTH;

/// Maximum length of a member or user display name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate and normalize a display name. Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Validate an email address and return it trimmed and lowercased.
pub fn validate_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(email)
}

/// Validate an optional email; blank strings are treated as absent.
pub fn validate_optional_email(email: Option<&str>) -> Result<Option<String>, CoreError> {
    match email.map(str::trim) {
        None | Some("") => Ok(None),
        Some(email) => validate_email(email).map(Some),
    }
}

/// Validate an optional directory role label ("Designer", "Developer").
pub fn validate_role_label(role: Option<&str>) -> Result<Option<String>, CoreError> {
    match role.map(str::trim) {
        None | Some("") => Ok(None),
        Some(role) if role.chars().count() > MAX_ROLE_LENGTH => Err(CoreError::Validation(
            format!("Role must be at most {MAX_ROLE_LENGTH} characters"),
        )),
        Some(role) => Ok(Some(role.to_string())),
    }
}
