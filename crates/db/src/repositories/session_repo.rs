//! Repository for the `refresh_sessions` table.

use sqlx::PgPool;
use pulse_core::types::DbId;

use crate::models::session::{NewSession, RefreshSession};

const COLUMNS: &str = "id, user_id, token_hash, expires_at, revoked_at, created_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn issue(pool: &PgPool, input: &NewSession) -> Result<RefreshSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_sessions (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Spend a refresh token.
    ///
    /// Revokes the session in the same statement that checks it, so a token
    /// can be exchanged at most once even under concurrent requests. Returns
    /// the owning user id, or `None` if the token is unknown, spent, or
    /// expired.
    pub async fn consume(pool: &PgPool, token_hash: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE refresh_sessions SET revoked_at = NOW()
             WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Sessions of a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RefreshSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_sessions WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
