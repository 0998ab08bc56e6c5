//! Repository for the `tasks` table (plain CRUD).
//!
//! Board operations go through [`crate::repositories::BoardRepo`]; this
//! repository serves the `/tasks` resource and list views.

use sqlx::PgPool;
use uuid::Uuid;
use pulse_core::types::{DbId, EntityUuid};

use crate::models::task::{CreateTask, TaskRow, TaskWithAssignee, UpdateTask};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, project_id, title, description, status, priority, \
                                  assignee_id, due_date, tags, created_by, created_at, updated_at";

/// Columns for [`TaskWithAssignee`], expecting `tasks t` joined with `members m`.
const JOINED_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.status, \
                              t.priority, t.assignee_id, m.name AS assignee_name, t.due_date, \
                              t.tags, t.created_by, t.created_at, t.updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task with a fresh UUID v7, returning the created row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateTask,
    ) -> Result<TaskRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (id, project_id, title, description, status, priority,
                 assignee_id, due_date, tags, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(Uuid::now_v7())
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.assignee_id)
            .bind(input.due_date)
            .bind(&input.tags)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityUuid,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by ID with its assignee name.
    pub async fn find_with_assignee(
        pool: &PgPool,
        id: EntityUuid,
    ) -> Result<Option<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t
             LEFT JOIN members m ON m.id = t.assignee_id
             WHERE t.id = $1"
        );
        let row = sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TaskWithAssignee::normalized))
    }

    /// List a project's tasks with assignee names, in board order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t
             LEFT JOIN members m ON m.id = t.assignee_id
             WHERE t.project_id = $1
             ORDER BY t.position, t.id"
        );
        let rows = sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TaskWithAssignee::normalized).collect())
    }

    /// List tasks across every project the member belongs to.
    pub async fn list_for_member(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t
             JOIN project_members pm ON pm.project_id = t.project_id AND pm.member_id = $1
             LEFT JOIN members m ON m.id = t.assignee_id
             ORDER BY t.created_at, t.id"
        );
        let rows = sqlx::query_as::<_, TaskWithAssignee>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TaskWithAssignee::normalized).collect())
    }

    /// Replace every editable column of a task.
    ///
    /// A status change moves the task to the end of its new bucket.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityUuid,
        input: &UpdateTask,
    ) -> Result<Option<TaskRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                priority = $5,
                assignee_id = $6,
                due_date = $7,
                tags = $8,
                position = CASE
                    WHEN status = $4 THEN position
                    ELSE nextval('task_position_seq')
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.assignee_id)
            .bind(input.due_date)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityUuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
