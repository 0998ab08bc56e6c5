//! Authentication and authorization extractors and guards.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`project_access`] -- Project membership and ownership checks.

pub mod auth;
pub mod project_access;
