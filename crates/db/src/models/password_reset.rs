//! Password reset token model.

use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

/// A row from the `password_resets` table. Only the token hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordReset {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub struct CreatePasswordReset {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
