//! Repository for the `users` table.

use sqlx::PgPool;
use pulse_core::types::DbId;

use crate::models::member::Member;
use crate::models::user::{CreateUser, User};
use crate::repositories::member_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user together with its linked member row.
    ///
    /// Both rows are written in one transaction; if the member insert fails
    /// (e.g. the email is already on a member) no user is created either.
    pub async fn create_with_member(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<(User, Member), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        // Adopt an existing unlinked member with the same email, otherwise
        // create a fresh one.
        let member_query = format!(
            "INSERT INTO members (name, email, user_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_members_email
             DO UPDATE SET user_id = EXCLUDED.user_id
             WHERE members.user_id IS NULL
             RETURNING {}",
            member_repo::COLUMNS
        );
        let adopted = sqlx::query_as::<_, Member>(&member_query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .fetch_optional(&mut *tx)
            .await?;

        // The email belongs to a member already linked to someone else.
        let member = match adopted {
            Some(member) => member,
            None => {
                let fallback = format!(
                    "INSERT INTO members (name, user_id) VALUES ($1, $2) RETURNING {}",
                    member_repo::COLUMNS
                );
                sqlx::query_as::<_, Member>(&fallback)
                    .bind(&user.name)
                    .bind(user.id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok((user, member))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercased.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
