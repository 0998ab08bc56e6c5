//! Refresh session rows.

use sqlx::FromRow;
use pulse_core::types::{DbId, Timestamp};

/// A row from the `refresh_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    /// Set when the token is exchanged or the user logs out.
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl RefreshSession {
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// A refresh token about to be issued.
#[derive(Debug)]
pub struct NewSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
