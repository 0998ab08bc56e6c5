//! Login accounts. A user owns at most one member row, which is how the
//! account appears on project rosters and task assignments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

/// A `users` row. Not `Serialize`: it carries the password hash, so
/// responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Account as returned by `/user` and the auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    /// The member row linked to this account.
    pub member_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn new(user: &User, member_id: Option<DbId>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            member_id,
            created_at: user.created_at,
        }
    }
}

/// Insert payload. The password is already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
