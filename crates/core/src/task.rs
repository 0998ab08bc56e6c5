//! Task status and priority vocabularies plus task field validation.
//!
//! Statuses are stored as free text in the database, so two parsers exist:
//! [`TaskStatus::parse`] is strict and used for request input, while
//! [`TaskStatus::from_stored`] never fails and folds anything unrecognized
//! into [`TaskStatus::Backlog`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a task title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum number of tags on a single task.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

/// The three board buckets. Every pair of distinct statuses is a valid move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Backlog,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Backlog,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Strictly parse a status coming from a client.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "backlog" => Ok(TaskStatus::Backlog),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(CoreError::Validation(format!(
                "Invalid task status '{other}'. Must be one of: backlog, in-progress, done"
            ))),
        }
    }

    /// Interpret a stored status. Unknown values land in the backlog.
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or(TaskStatus::Backlog)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/* --------------------------------------------------------------------------
Priority
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Strictly parse a priority coming from a client.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(CoreError::Validation(format!(
                "Invalid task priority '{other}'. Must be one of: low, medium, high"
            ))),
        }
    }

    /// Interpret a stored priority. Unknown values read as medium.
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/* --------------------------------------------------------------------------
Field validation
-------------------------------------------------------------------------- */

/// Validate a task title and return it trimmed.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Task title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Task title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

/// Normalize a tag list: trims, drops blanks and duplicates, keeps order.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(CoreError::Validation(format!(
                "Tag '{tag}' exceeds {MAX_TAG_LENGTH} characters"
            )));
        }
        out.push(tag.to_string());
    }
    if out.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "A task may carry at most {MAX_TAGS} tags"
        )));
    }
    Ok(out)
}
