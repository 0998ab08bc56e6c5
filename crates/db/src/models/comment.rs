//! Task comment row model.

use sqlx::FromRow;
use pulse_core::board::Comment;
use pulse_core::types::{DbId, EntityUuid, Timestamp};

/// A row from the `task_comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: EntityUuid,
    pub task_id: EntityUuid,
    pub author_id: DbId,
    pub author_name: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            task_id: row.task_id,
            author_id: row.author_id,
            author_name: row.author_name,
            body: row.body,
            created_at: row.created_at,
        }
    }
}
