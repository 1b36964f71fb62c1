//! Task domain model.
//!
//! # Responsibility
//! - Define the actionable item owned by a project.
//! - Provide partial edits, completion toggling and snapshot reads.
//!
//! # Invariants
//! - `priority` is always one of `low|medium|high`.
//! - `id` is generated once and never reassigned.
//! - `last_updated` is non-decreasing across `edit`/`toggle_completion`.
//! - `read()` returns an owned record; mutating it never affects the task.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{generate_id, next_timestamp};

/// Stable task identifier (UUID v4 text for generated tasks).
pub type TaskId = String;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while constructing or patching domain entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Priority text outside `low|medium|high`.
    InvalidPriority(String),
    /// Due date text that is neither `YYYY-MM-DD` nor RFC 3339.
    InvalidDueDate(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPriority(value) => write!(
                f,
                "invalid priority value `{value}`; expected low|medium|high"
            ),
            Self::InvalidDueDate(value) => write!(
                f,
                "invalid due date `{value}`; expected YYYY-MM-DD or RFC 3339"
            ),
        }
    }
}

impl Error for ModelError {}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire/storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    /// Exact, case-sensitive match on the wire spelling.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ModelError::InvalidPriority(other.to_string())),
        }
    }
}

/// Parses user due-date input.
///
/// `YYYY-MM-DD` is read as midnight UTC of that day; anything else must be a
/// full RFC 3339 timestamp.
pub fn parse_due_date(input: &str) -> ModelResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(NaiveDateTime::new(date, NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| ModelError::InvalidDueDate(trimmed.to_string()))
}

/// Plain, independent copy of a task's state.
///
/// This is also the persisted task shape (`todoList` entries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub name: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub parent_project: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default)]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for [`Task::edit`].
///
/// Unset fields keep the task's current value. Priority is typed, so a patch
/// can never carry an invalid priority; [`TaskEdit::priority_str`] validates
/// raw text before it reaches the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub name: Option<String>,
    pub detail: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
}

impl TaskEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets priority from raw text.
    ///
    /// # Errors
    /// - `ModelError::InvalidPriority` for anything but `low|medium|high`.
    pub fn priority_str(self, raw: &str) -> ModelResult<Self> {
        Ok(self.priority(raw.parse()?))
    }

    /// Returns whether the patch changes no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.detail.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }
}

/// One actionable item inside a project.
///
/// Fields are private; callers observe state through accessors or
/// [`Task::read`] and change it only through `edit`/`toggle_completion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    name: String,
    detail: String,
    parent_project: String,
    due_date: DateTime<Utc>,
    priority: Priority,
    creation_date: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    completed: bool,
}

impl Task {
    /// Creates a task with a generated id.
    ///
    /// `parent_project` is the owning project's name; it is a display
    /// reference only and never used to reach the project.
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        parent_project: impl Into<String>,
        due_date: DateTime<Utc>,
        priority: Priority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            detail: detail.into(),
            parent_project: parent_project.into(),
            due_date,
            priority,
            creation_date: now,
            last_updated: now,
            completed: false,
        }
    }

    /// Creates a task from raw priority text.
    ///
    /// # Errors
    /// - `ModelError::InvalidPriority` when `priority` is not
    ///   `low|medium|high`. No task id is consumed on failure.
    pub fn try_new(
        name: impl Into<String>,
        detail: impl Into<String>,
        parent_project: impl Into<String>,
        due_date: DateTime<Utc>,
        priority: &str,
    ) -> ModelResult<Self> {
        let priority = priority.parse::<Priority>()?;
        Ok(Self::new(name, detail, parent_project, due_date, priority))
    }

    /// Restores a task from a persisted record without re-validation.
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.task_id,
            name: record.name,
            detail: record.detail,
            parent_project: record.parent_project,
            due_date: record.due_date,
            priority: record.priority,
            creation_date: record.creation_date,
            last_updated: record.last_updated,
            completed: record.completed,
        }
    }

    /// Applies a partial update and refreshes `last_updated`.
    ///
    /// An empty patch still refreshes `last_updated`.
    pub fn edit(&mut self, patch: TaskEdit) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(detail) = patch.detail {
            self.detail = detail;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.touch();
    }

    /// Flips the completed flag and refreshes `last_updated`.
    pub fn toggle_completion(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    /// Returns an independent snapshot of every field.
    pub fn read(&self) -> TaskRecord {
        TaskRecord {
            task_id: self.id.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            parent_project: self.parent_project.clone(),
            due_date: self.due_date,
            priority: self.priority,
            creation_date: self.creation_date,
            last_updated: self.last_updated,
            completed: self.completed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn parent_project(&self) -> &str {
        &self.parent_project
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the task falls due on `day` (UTC calendar day).
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due_date.date_naive() == day
    }

    fn touch(&mut self) {
        self.last_updated = next_timestamp(self.last_updated);
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self::from_record(record)
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            task_id: task.id,
            name: task.name,
            detail: task.detail,
            parent_project: task.parent_project,
            due_date: task.due_date,
            priority: task.priority,
            creation_date: task.creation_date,
            last_updated: task.last_updated,
            completed: task.completed,
        }
    }
}
