//! Repository for the `members` table.

use sqlx::PgPool;
use pulse_core::types::DbId;

use crate::models::member::{CreateMember, Member, UpdateMember};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, email, role, user_id, created_at, updated_at";

/// Provides CRUD operations for the member directory.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (name, email, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a member by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the member linked to a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE user_id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all members ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members ORDER BY name, id");
        sqlx::query_as::<_, Member>(&query).fetch_all(pool).await
    }

    /// Update a member. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member by ID. Returns `true` if a row was removed.
    ///
    /// Pivot rows go with it; tasks assigned to the member become unassigned.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
