//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO where the table supports updates

pub mod comment;
pub mod member;
pub mod password_reset;
pub mod project;
pub mod project_member;
pub mod session;
pub mod task;
pub mod user;
