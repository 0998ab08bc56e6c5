//! Load/save boundary between the database and [`TaskBoard`].
//!
//! A board is loaded whole, one operation is applied in memory, and only
//! the record that changed is written back.

use std::collections::HashMap;

use sqlx::PgPool;
use pulse_core::board::{Comment, Task, TaskBoard};
use pulse_core::types::{DbId, EntityUuid};

use crate::models::comment::CommentRow;
use crate::models::task::TaskRow;
use crate::repositories::{comment_repo, task_repo};

pub struct BoardRepo;

impl BoardRepo {
    /// Load every task of a project, with comment threads, into a board.
    ///
    /// Within each bucket tasks come back in the order they entered it, which
    /// is the order the board appends them in. Stored statuses the board
    /// does not know are placed in the backlog.
    pub async fn load(pool: &PgPool, project_id: DbId) -> Result<TaskBoard, sqlx::Error> {
        let task_query = format!(
            "SELECT {} FROM tasks WHERE project_id = $1 ORDER BY position, id",
            task_repo::COLUMNS
        );
        let rows = sqlx::query_as::<_, TaskRow>(&task_query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;

        let comment_query = format!(
            "SELECT {} FROM task_comments
             WHERE task_id IN (SELECT id FROM tasks WHERE project_id = $1)
             ORDER BY created_at, id",
            comment_repo::COLUMNS
        );
        let comment_rows = sqlx::query_as::<_, CommentRow>(&comment_query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;

        let mut threads: HashMap<EntityUuid, Vec<Comment>> = HashMap::new();
        for row in comment_rows {
            threads.entry(row.task_id).or_default().push(row.into());
        }

        let tasks = rows.into_iter().map(|row| {
            let comments = threads.remove(&row.id).unwrap_or_default();
            row.into_task(comments)
        });

        tracing::debug!(project_id, "Board loaded");
        Ok(TaskBoard::load(project_id, tasks))
    }

    /// Insert or overwrite a task row from its board representation.
    ///
    /// A new task, or one whose status changed, is placed at the end of its
    /// bucket. Comments are not touched; use [`BoardRepo::insert_comment`].
    pub async fn save_task(pool: &PgPool, task: &Task) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tasks
                (id, project_id, title, description, status, priority,
                 assignee_id, due_date, tags, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                priority = EXCLUDED.priority,
                assignee_id = EXCLUDED.assignee_id,
                due_date = EXCLUDED.due_date,
                tags = EXCLUDED.tags,
                updated_at = EXCLUDED.updated_at,
                position = CASE
                    WHEN tasks.status = EXCLUDED.status THEN tasks.position
                    ELSE EXCLUDED.position
                END",
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.assignee_id)
        .bind(task.due_date)
        .bind(&task.tags)
        .bind(task.created_by)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Append a comment produced by the board.
    pub async fn insert_comment(pool: &PgPool, comment: &Comment) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO task_comments (id, task_id, author_id, author_name, body, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(comment.id)
        .bind(comment.task_id)
        .bind(comment.author_id)
        .bind(&comment.author_name)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
