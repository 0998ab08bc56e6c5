//! Repository for the `projects` table.

use sqlx::PgPool;
use pulse_core::roles::ROLE_OWNER;
use pulse_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, creator_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and attach its creator as owner.
    ///
    /// `creator_member_id` is the member row linked to `creator_id`. Both
    /// inserts share one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        creator_id: DbId,
        creator_member_id: DbId,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, creator_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(creator_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_members (project_id, member_id, role)
             VALUES ($1, $2, $3)",
        )
        .bind(project.id)
        .bind(creator_member_id)
        .bind(ROLE_OWNER)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects a member belongs to, most recently created first.
    pub async fn list_for_member(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects p
             JOIN project_members pm ON pm.project_id = p.id
             WHERE pm.member_id = $1
             ORDER BY p.created_at DESC, p.id DESC",
            prefixed("p")
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    ///
    /// Pivot rows, tasks and comments cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `COLUMNS` qualified with a table alias, for joins.
fn prefixed(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
