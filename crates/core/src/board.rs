//! Task board state model.
//!
//! A [`TaskBoard`] holds every task of one project, partitioned into the
//! three status buckets. All operations are synchronous and in-memory. The
//! persistence layer loads a board, applies one operation, and writes back
//! the record that changed.
//!
//! Operations that reference a task id which is not on the board report
//! [`CoreError::NotFound`] and leave the board untouched. A move whose
//! source and destination are the same bucket is not an error: it is a
//! no-op reported as `Ok(None)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::task::{normalize_tags, validate_title, TaskPriority, TaskStatus};
use crate::types::{DbId, EntityUuid, Timestamp};

/// Maximum length of a comment body.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/* --------------------------------------------------------------------------
Records
-------------------------------------------------------------------------- */

/// A comment on a task. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityUuid,
    pub task_id: EntityUuid,
    pub author_id: DbId,
    /// Author display name at the time of writing.
    pub author_name: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// A task as held by the board, including its comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityUuid,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Member id of the assignee. Names are resolved at render time.
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// User id of the creator.
    pub created_by: DbId,
    pub comments: Vec<Comment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for [`TaskBoard::create_task`].
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// The complete editable record for [`TaskBoard::update_task`].
///
/// Every field is replaced; an absent `assignee_id` or `due_date` clears it.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// Entry of the member lookup table used to filter and assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: DbId,
    pub name: String,
}

/// The acting user, as seen by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub name: String,
}

/* --------------------------------------------------------------------------
Buckets
-------------------------------------------------------------------------- */

/// Tasks grouped by status, each bucket in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub backlog: Vec<Task>,
    #[serde(rename = "in-progress")]
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl Buckets {
    pub fn bucket(&self, status: TaskStatus) -> &Vec<Task> {
        match status {
            TaskStatus::Backlog => &self.backlog,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Backlog => &mut self.backlog,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Total number of tasks across all buckets.
    pub fn len(&self) -> usize {
        self.backlog.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate a task: the bucket holding it and its index within that bucket.
    fn locate(&self, task_id: EntityUuid) -> Option<(TaskStatus, usize)> {
        TaskStatus::ALL.into_iter().find_map(|status| {
            self.bucket(status)
                .iter()
                .position(|t| t.id == task_id)
                .map(|idx| (status, idx))
        })
    }

    fn retain(&self, keep: impl Fn(&Task) -> bool) -> Buckets {
        let pick = |tasks: &Vec<Task>| -> Vec<Task> {
            tasks.iter().filter(|t| keep(t)).cloned().collect()
        };
        Buckets {
            backlog: pick(&self.backlog),
            in_progress: pick(&self.in_progress),
            done: pick(&self.done),
        }
    }
}

/* --------------------------------------------------------------------------
Board
-------------------------------------------------------------------------- */

/// The authoritative task set of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBoard {
    pub project_id: DbId,
    pub buckets: Buckets,
}

impl TaskBoard {
    /// An empty board for a project.
    pub fn new(project_id: DbId) -> Self {
        Self {
            project_id,
            buckets: Buckets::default(),
        }
    }

    /// Build a board from stored tasks.
    ///
    /// Tasks of other projects are skipped. Input order is kept within
    /// each bucket.
    pub fn load(project_id: DbId, tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::new(project_id);
        for task in tasks.into_iter().filter(|t| t.project_id == project_id) {
            board.buckets.bucket_mut(task.status).push(task);
        }
        board
    }

    pub fn find_task(&self, task_id: EntityUuid) -> Option<&Task> {
        self.buckets
            .locate(task_id)
            .map(|(status, idx)| &self.buckets.bucket(status)[idx])
    }

    fn find_task_mut(&mut self, task_id: EntityUuid) -> Result<&mut Task, CoreError> {
        let (status, idx) = self
            .buckets
            .locate(task_id)
            .ok_or_else(|| CoreError::not_found("Task", task_id))?;
        Ok(&mut self.buckets.bucket_mut(status)[idx])
    }

    /// Restrict the board to tasks assigned to `member_id`.
    ///
    /// The member is resolved against `members`; if it is not there the
    /// unfiltered buckets come back.
    pub fn filter_by_member(&self, member_id: DbId, members: &[MemberRef]) -> Buckets {
        match members.iter().find(|m| m.id == member_id) {
            Some(member) => self
                .buckets
                .retain(|t| t.assignee_id == Some(member.id)),
            None => self.buckets.clone(),
        }
    }

    /// Move a task between buckets, appending it to the destination.
    ///
    /// Returns `Ok(None)` when `from == to`. Fails with `NotFound` if the task
    /// is not in the claimed source bucket.
    pub fn move_task(
        &mut self,
        task_id: EntityUuid,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<Option<&Task>, CoreError> {
        if from == to {
            return Ok(None);
        }

        let source = self.buckets.bucket_mut(from);
        let idx = source
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| CoreError::not_found("Task", task_id))?;

        let mut task = source.remove(idx);
        task.status = to;

        let target = self.buckets.bucket_mut(to);
        target.push(task);
        Ok(target.last())
    }

    /// Replace a task's assignee (or clear it). Status is untouched.
    pub fn assign_task(
        &mut self,
        task_id: EntityUuid,
        assignee: Option<&MemberRef>,
    ) -> Result<&Task, CoreError> {
        let task = self.find_task_mut(task_id)?;
        task.assignee_id = assignee.map(|m| m.id);
        Ok(task)
    }

    /// Validate a draft and append a new task to `target`.
    pub fn create_task(
        &mut self,
        draft: TaskDraft,
        target: TaskStatus,
        creator: &Actor,
        now: Timestamp,
    ) -> Result<&Task, CoreError> {
        if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "Task title and description are required".into(),
            ));
        }
        let title = validate_title(&draft.title)?;
        let tags = normalize_tags(&draft.tags)?;

        let task = Task {
            id: Uuid::now_v7(),
            project_id: self.project_id,
            title,
            description: draft.description.trim().to_string(),
            status: target,
            priority: draft.priority.unwrap_or_default(),
            assignee_id: draft.assignee_id,
            due_date: draft.due_date,
            tags,
            created_by: creator.user_id,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let bucket = self.buckets.bucket_mut(target);
        bucket.push(task);
        Ok(&bucket[bucket.len() - 1])
    }

    /// Replace the editable fields of an existing task in place.
    ///
    /// The task stays in its current bucket. Identity, project, creator,
    /// creation time, and comments are preserved.
    pub fn update_task(
        &mut self,
        task_id: EntityUuid,
        edit: TaskEdit,
        now: Timestamp,
    ) -> Result<&Task, CoreError> {
        let title = validate_title(&edit.title)?;
        let tags = normalize_tags(&edit.tags)?;

        let task = self.find_task_mut(task_id)?;
        task.title = title;
        task.description = edit.description.trim().to_string();
        task.priority = edit.priority;
        task.assignee_id = edit.assignee_id;
        task.due_date = edit.due_date;
        task.tags = tags;
        task.updated_at = now;
        Ok(task)
    }

    /// Append a comment to a task's thread.
    ///
    /// The new comment's timestamp is never earlier than the previous one.
    pub fn add_comment(
        &mut self,
        task_id: EntityUuid,
        author: &Actor,
        text: &str,
        now: Timestamp,
    ) -> Result<&Comment, CoreError> {
        let body = text.trim();
        if body.is_empty() {
            return Err(CoreError::Validation("Comment text must not be empty".into()));
        }
        if body.chars().count() > MAX_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }

        let task = self.find_task_mut(task_id)?;
        let created_at = task
            .comments
            .last()
            .map_or(now, |last| last.created_at.max(now));

        task.comments.push(Comment {
            id: Uuid::now_v7(),
            task_id,
            author_id: author.user_id,
            author_name: author.name.clone(),
            body: body.to_string(),
            created_at,
        });
        Ok(&task.comments[task.comments.len() - 1])
    }

    /// Serialize the whole board.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Internal(format!("Board serialization failed: {e}")))
    }

    /// Restore a board serialized with [`TaskBoard::to_json`].
    ///
    /// Each task's `status` is realigned with the bucket that holds it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut board: TaskBoard = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Malformed board snapshot: {e}")))?;
        for status in TaskStatus::ALL {
            for task in board.buckets.bucket_mut(status) {
                task.status = status;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    const PROJECT: DbId = 1;
    const ALEX: DbId = 10;
    const SARAH: DbId = 11;

    fn actor() -> Actor {
        Actor {
            user_id: 100,
            name: "John Doe".to_string(),
        }
    }

    fn members() -> Vec<MemberRef> {
        vec![
            MemberRef { id: ALEX, name: "Alex".into() },
            MemberRef { id: SARAH, name: "Sarah".into() },
        ]
    }

    fn stored_task(title: &str, status: TaskStatus, assignee: Option<DbId>) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::now_v7(),
            project_id: PROJECT,
            title: title.to_string(),
            description: format!("{title} description"),
            status,
            priority: TaskPriority::Medium,
            assignee_id: assignee,
            due_date: None,
            tags: vec!["design".into()],
            created_by: 100,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn draft(title: &str, description: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            priority: Some(TaskPriority::High),
            ..TaskDraft::default()
        }
    }

    fn counts(board: &TaskBoard) -> (usize, usize, usize) {
        (
            board.buckets.backlog.len(),
            board.buckets.in_progress.len(),
            board.buckets.done.len(),
        )
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    #[test]
    fn load_partitions_by_status_and_project() {
        let mut other = stored_task("Elsewhere", TaskStatus::Done, None);
        other.project_id = 2;
        let tasks = vec![
            stored_task("A", TaskStatus::Backlog, None),
            stored_task("B", TaskStatus::InProgress, None),
            stored_task("C", TaskStatus::Backlog, None),
            other,
        ];

        let board = TaskBoard::load(PROJECT, tasks);

        assert_eq!(counts(&board), (2, 1, 0));
        assert_eq!(board.buckets.backlog[0].title, "A");
        assert_eq!(board.buckets.backlog[1].title, "C");
    }

    #[test]
    fn unknown_stored_status_loads_into_backlog() {
        let mut task = stored_task("Old", TaskStatus::Done, None);
        task.status = TaskStatus::from_stored("archived");

        let board = TaskBoard::load(PROJECT, vec![task]);

        assert_eq!(counts(&board), (1, 0, 0));
        assert_eq!(board.buckets.backlog[0].status, TaskStatus::Backlog);
    }

    // -----------------------------------------------------------------------
    // Filter
    // -----------------------------------------------------------------------

    #[test]
    fn filter_by_member_keeps_only_their_tasks() {
        let alex_task = stored_task("Design Landing Page", TaskStatus::InProgress, Some(ALEX));
        let sarah_task = stored_task("Implement Auth", TaskStatus::Backlog, Some(SARAH));
        let alex_id = alex_task.id;
        let board = TaskBoard::load(PROJECT, vec![alex_task, sarah_task]);

        let filtered = board.filter_by_member(ALEX, &members());

        assert_eq!(filtered.len(), 1);
        assert!(filtered.backlog.is_empty());
        assert_eq!(filtered.in_progress[0].id, alex_id);
    }

    #[test]
    fn filter_by_unknown_member_returns_everything() {
        let board = TaskBoard::load(
            PROJECT,
            vec![
                stored_task("A", TaskStatus::Backlog, Some(ALEX)),
                stored_task("B", TaskStatus::Done, None),
            ],
        );

        let filtered = board.filter_by_member(999, &members());

        assert_eq!(filtered, board.buckets);
    }

    // -----------------------------------------------------------------------
    // Move
    // -----------------------------------------------------------------------

    #[test]
    fn move_changes_only_status() {
        let task = stored_task("Move me", TaskStatus::Backlog, Some(ALEX));
        let before = task.clone();
        let mut board = TaskBoard::load(PROJECT, vec![task]);

        let moved = board
            .move_task(before.id, TaskStatus::Backlog, TaskStatus::Done)
            .unwrap()
            .cloned()
            .expect("task should have moved");

        assert!(board.buckets.backlog.is_empty());
        assert_eq!(board.buckets.done.len(), 1);
        assert_eq!(moved.status, TaskStatus::Done);
        assert_eq!(Task { status: TaskStatus::Backlog, ..moved }, before);
    }

    #[test]
    fn move_appends_to_destination() {
        let first = stored_task("First", TaskStatus::Done, None);
        let second = stored_task("Second", TaskStatus::Backlog, None);
        let second_id = second.id;
        let mut board = TaskBoard::load(PROJECT, vec![first, second]);

        board
            .move_task(second_id, TaskStatus::Backlog, TaskStatus::Done)
            .unwrap();

        assert_eq!(board.buckets.done[1].id, second_id);
    }

    #[test]
    fn move_to_same_bucket_is_noop() {
        let task = stored_task("Stay", TaskStatus::InProgress, None);
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);
        let before = board.to_json().unwrap();

        let result = board
            .move_task(id, TaskStatus::InProgress, TaskStatus::InProgress)
            .unwrap();

        assert!(result.is_none());
        assert_eq!(board.to_json().unwrap(), before);
    }

    #[test]
    fn move_from_wrong_bucket_reports_not_found_and_changes_nothing() {
        let task = stored_task("Here", TaskStatus::Backlog, None);
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);
        let before = board.clone();

        let err = board
            .move_task(id, TaskStatus::InProgress, TaskStatus::Done)
            .unwrap_err();

        assert_matches!(err, CoreError::NotFound { entity: "Task", .. });
        assert_eq!(board, before);
    }

    #[test]
    fn every_transition_is_allowed() {
        for from in TaskStatus::ALL {
            for to in TaskStatus::ALL.into_iter().filter(|s| *s != from) {
                let task = stored_task("Hop", from, None);
                let id = task.id;
                let mut board = TaskBoard::load(PROJECT, vec![task]);
                let moved = board.move_task(id, from, to).unwrap();
                assert_eq!(moved.map(|t| t.status), Some(to));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Assign
    // -----------------------------------------------------------------------

    #[test]
    fn assign_replaces_assignee_and_keeps_status() {
        let task = stored_task("Assign me", TaskStatus::InProgress, Some(ALEX));
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);
        let sarah = members().remove(1);

        let updated = board.assign_task(id, Some(&sarah)).unwrap();
        assert_eq!(updated.assignee_id, Some(SARAH));
        assert_eq!(updated.status, TaskStatus::InProgress);

        let cleared = board.assign_task(id, None).unwrap();
        assert_eq!(cleared.assignee_id, None);
    }

    #[test]
    fn assign_unknown_task_reports_not_found() {
        let mut board = TaskBoard::new(PROJECT);
        let err = board.assign_task(Uuid::now_v7(), None).unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    #[test]
    fn create_then_move_scenario() {
        let mut board = TaskBoard::new(PROJECT);

        let created = board
            .create_task(
                draft("Design Landing Page", "Create wireframes"),
                TaskStatus::Backlog,
                &actor(),
                Utc::now(),
            )
            .unwrap()
            .clone();

        assert_eq!(counts(&board), (1, 0, 0));
        assert_eq!(created.priority, TaskPriority::High);
        assert_eq!(created.created_by, actor().user_id);
        assert_eq!(created.project_id, PROJECT);
        assert!(created.comments.is_empty());

        board
            .move_task(created.id, TaskStatus::Backlog, TaskStatus::Done)
            .unwrap();

        assert_eq!(counts(&board), (0, 0, 1));
        assert_eq!(board.buckets.done[0].id, created.id);
        assert_eq!(board.buckets.done[0].title, "Design Landing Page");
    }

    #[test]
    fn create_without_title_is_rejected() {
        let mut board = TaskBoard::load(PROJECT, vec![stored_task("A", TaskStatus::Backlog, None)]);

        let err = board
            .create_task(draft("", "desc"), TaskStatus::Backlog, &actor(), Utc::now())
            .unwrap_err();

        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(counts(&board), (1, 0, 0));
    }

    #[test]
    fn create_without_description_is_rejected() {
        let mut board = TaskBoard::new(PROJECT);

        let err = board
            .create_task(draft("Title", "   "), TaskStatus::Done, &actor(), Utc::now())
            .unwrap_err();

        assert_matches!(err, CoreError::Validation(_));
        assert!(board.buckets.is_empty());
    }

    #[test]
    fn created_ids_are_unique() {
        let mut board = TaskBoard::new(PROJECT);
        let a = board
            .create_task(draft("A", "a"), TaskStatus::Backlog, &actor(), Utc::now())
            .unwrap()
            .id;
        let b = board
            .create_task(draft("B", "b"), TaskStatus::Backlog, &actor(), Utc::now())
            .unwrap()
            .id;
        assert_ne!(a, b);
    }

    #[test]
    fn draft_priority_defaults_to_medium() {
        let mut board = TaskBoard::new(PROJECT);
        let mut input = draft("A", "a");
        input.priority = None;

        let task = board
            .create_task(input, TaskStatus::InProgress, &actor(), Utc::now())
            .unwrap();

        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_replaces_record_in_place() {
        let mut task = stored_task("Before", TaskStatus::InProgress, Some(ALEX));
        task.comments.push(Comment {
            id: Uuid::now_v7(),
            task_id: task.id,
            author_id: 100,
            author_name: "John Doe".into(),
            body: "keep me".into(),
            created_at: Utc::now(),
        });
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);

        let edit = TaskEdit {
            title: "After".into(),
            description: "New description".into(),
            priority: TaskPriority::Low,
            assignee_id: None,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            tags: vec!["ui".into()],
        };
        let updated = board.update_task(id, edit, Utc::now()).unwrap().clone();

        assert_eq!(updated.title, "After");
        assert_eq!(updated.assignee_id, None);
        assert_eq!(updated.priority, TaskPriority::Low);
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.comments.len(), 1);
        assert_eq!(board.buckets.in_progress[0], updated);
    }

    #[test]
    fn update_unknown_task_reports_not_found() {
        let mut board = TaskBoard::new(PROJECT);
        let edit = TaskEdit {
            title: "X".into(),
            description: String::new(),
            priority: TaskPriority::Medium,
            assignee_id: None,
            due_date: None,
            tags: Vec::new(),
        };
        assert_matches!(
            board.update_task(Uuid::now_v7(), edit, Utc::now()),
            Err(CoreError::NotFound { .. })
        );
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    #[test]
    fn blank_comment_is_rejected() {
        let task = stored_task("Discuss", TaskStatus::Backlog, None);
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);

        let err = board.add_comment(id, &actor(), "  \n\t", Utc::now()).unwrap_err();

        assert_matches!(err, CoreError::Validation(_));
        assert!(board.find_task(id).unwrap().comments.is_empty());
    }

    #[test]
    fn comment_appends_with_author_and_text() {
        let task = stored_task("Discuss", TaskStatus::Backlog, None);
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);

        let comment = board
            .add_comment(id, &actor(), "Use the new brand guidelines.", Utc::now())
            .unwrap()
            .clone();

        let thread = &board.find_task(id).unwrap().comments;
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0], comment);
        assert_eq!(comment.author_name, "John Doe");
        assert_eq!(comment.author_id, 100);
        assert_eq!(comment.body, "Use the new brand guidelines.");
    }

    #[test]
    fn comment_timestamps_are_monotonic() {
        let task = stored_task("Discuss", TaskStatus::Backlog, None);
        let id = task.id;
        let mut board = TaskBoard::load(PROJECT, vec![task]);
        let now = Utc::now();

        let first = board.add_comment(id, &actor(), "first", now).unwrap().created_at;
        // A clock that steps backwards must not reorder the thread.
        let second = board
            .add_comment(id, &actor(), "second", now - Duration::seconds(30))
            .unwrap()
            .created_at;
        let third = board
            .add_comment(id, &actor(), "third", now + Duration::seconds(5))
            .unwrap()
            .created_at;

        assert!(second >= first);
        assert!(third >= second);
    }

    #[test]
    fn comment_on_unknown_task_reports_not_found() {
        let mut board = TaskBoard::new(PROJECT);
        let err = board
            .add_comment(Uuid::now_v7(), &actor(), "hello", Utc::now())
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_round_trip_is_identical() {
        let mut board = TaskBoard::load(
            PROJECT,
            vec![
                stored_task("A", TaskStatus::Backlog, Some(ALEX)),
                stored_task("B", TaskStatus::InProgress, None),
                stored_task("C", TaskStatus::Done, Some(SARAH)),
            ],
        );
        let id = board.buckets.backlog[0].id;
        board.add_comment(id, &actor(), "note", Utc::now()).unwrap();

        let json = board.to_json().unwrap();
        let restored = TaskBoard::from_json(&json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.to_json().unwrap(), json);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        assert_matches!(
            TaskBoard::from_json("{\"project_id\": 1}"),
            Err(CoreError::Validation(_))
        );
    }
}
