//! Task row models and DTOs.
//!
//! Status and priority are stored as text; conversion into the board's
//! [`Task`] goes through the lenient `from_stored` parsers.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use pulse_core::board::{Comment, Task};
use pulse_core::task::{TaskPriority, TaskStatus};
use pulse_core::types::{DbId, EntityUuid, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: EntityUuid,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskRow {
    /// Convert into a board task carrying the given comment thread.
    pub fn into_task(self, comments: Vec<Comment>) -> Task {
        Task {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            status: TaskStatus::from_stored(&self.status),
            priority: TaskPriority::from_stored(&self.priority),
            assignee_id: self.assignee_id,
            due_date: self.due_date,
            tags: self.tags,
            created_by: self.created_by,
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A task joined with its assignee's display name, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithAssignee {
    pub id: EntityUuid,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<DbId>,
    pub assignee_name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskWithAssignee {
    /// Normalize the stored status and priority to their canonical spelling.
    pub fn normalized(mut self) -> Self {
        self.status = TaskStatus::from_stored(&self.status).as_str().to_string();
        self.priority = TaskPriority::from_stored(&self.priority).as_str().to_string();
        self
    }
}

/// DTO for inserting a task outside the board (plain CRUD).
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// DTO for a full replace of a task's editable columns.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}
