//! Repository for the `password_resets` table.

use sqlx::PgPool;
use pulse_core::types::DbId;

use crate::models::password_reset::{CreatePasswordReset, PasswordReset};

const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

/// Issues and consumes single-use password reset tokens.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a new reset token hash.
    ///
    /// Any earlier unused token for the same user is invalidated first, so at
    /// most one reset link is live per account.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePasswordReset,
    ) -> Result<PasswordReset, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE password_resets SET used_at = NOW()
             WHERE user_id = $1 AND used_at IS NULL",
        )
        .bind(input.user_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO password_resets (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let reset = sqlx::query_as::<_, PasswordReset>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reset)
    }

    /// Find an unused, unexpired token for the user.
    pub async fn find_active(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
    ) -> Result<Option<PasswordReset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_resets
             WHERE user_id = $1
               AND token_hash = $2
               AND used_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(user_id)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Spend a reset token and apply its new password.
    ///
    /// The token is marked used, the password replaced, and every refresh
    /// session of the user revoked in one transaction. Returns `false`, with
    /// nothing changed, if the token was already used.
    pub async fn redeem(
        pool: &PgPool,
        reset: &PasswordReset,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let spent = sqlx::query(
            "UPDATE password_resets SET used_at = NOW() WHERE id = $1 AND used_at IS NULL",
        )
        .bind(reset.id)
        .execute(&mut *tx)
        .await?;
        if spent.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(reset.user_id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "UPDATE refresh_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(reset.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
