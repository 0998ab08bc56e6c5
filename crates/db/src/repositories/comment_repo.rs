//! Repository for the `task_comments` table.
//!
//! Comments are append-only: inserts happen through
//! [`crate::repositories::BoardRepo::insert_comment`] and there is no update
//! or delete.

use sqlx::PgPool;
use pulse_core::types::EntityUuid;

use crate::models::comment::CommentRow;

pub(crate) const COLUMNS: &str = "id, task_id, author_id, author_name, body, created_at";

pub struct CommentRepo;

impl CommentRepo {
    /// A task's comment thread in chronological order.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: EntityUuid,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_comments WHERE task_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}
