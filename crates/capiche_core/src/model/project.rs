//! Project domain model.
//!
//! # Responsibility
//! - Group tasks under a named project with its own identity.
//! - Track creation and last-update timestamps.
//!
//! # Invariants
//! - `id` is generated once (or supplied via `with_id`) and never changes.
//! - Task order is insertion order.
//! - Every mutating call refreshes `last_updated`, including a
//!   `delete_task` that finds nothing to remove.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskEdit, TaskRecord};
use super::{generate_id, next_timestamp};

/// Stable project identifier.
///
/// Generated projects use UUID v4 text; imported data may carry any
/// non-empty string.
pub type ProjectId = String;

/// Plain, deep copy of a project's state.
///
/// This is the persisted project shape and the element type of registry
/// exports. Missing optional fields default when decoding so records written
/// by older clients still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub todo_list: Vec<TaskRecord>,
}

/// Named grouping that exclusively owns an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProjectRecord", into = "ProjectRecord")]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    creation_date: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    tasks: Vec<Task>,
}

impl Project {
    /// Creates an empty project with a generated id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(generate_id(), name, description)
    }

    /// Creates an empty project with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally. The id
    /// is not validated here; the registry rejects empty ids on `add`.
    pub fn with_id(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            creation_date: now,
            last_updated: now,
            tasks: Vec::new(),
        }
    }

    /// Restores a project (and its tasks) from a record, trusted as-is.
    pub fn from_record(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            creation_date: record.creation_date,
            last_updated: record.last_updated,
            tasks: record.todo_list.into_iter().map(Task::from_record).collect(),
        }
    }

    /// Appends a task. Duplicate task ids are not rejected.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.touch();
    }

    /// Renames and/or re-describes the project.
    ///
    /// `None` keeps the current value. `last_updated` is always refreshed.
    pub fn update(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.touch();
    }

    /// Removes the first task with `task_id`.
    ///
    /// Returns whether a task was removed. `last_updated` is refreshed even
    /// when nothing matched.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let removed = match self.tasks.iter().position(|task| task.id() == task_id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        };
        self.touch();
        removed
    }

    /// Edits the first task with `task_id` and refreshes the project.
    ///
    /// Returns `false` (and leaves the project untouched) when no task
    /// matches.
    pub fn edit_task(&mut self, task_id: &str, patch: TaskEdit) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) else {
            return false;
        };
        task.edit(patch);
        self.touch();
        true
    }

    /// Toggles completion of the first task with `task_id`.
    ///
    /// Returns the new completed state, or `None` when no task matches.
    pub fn toggle_task(&mut self, task_id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id() == task_id)?;
        task.toggle_completion();
        let completed = task.is_completed();
        self.touch();
        Some(completed)
    }

    /// Returns a deep, independent copy of the project and its tasks.
    pub fn snapshot(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            creation_date: self.creation_date,
            last_updated: self.last_updated,
            todo_list: self.tasks.iter().map(Task::read).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }

    fn touch(&mut self) {
        self.last_updated = next_timestamp(self.last_updated);
    }
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self::from_record(record)
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        ProjectRecord {
            id: project.id,
            name: project.name,
            description: project.description,
            creation_date: project.creation_date,
            last_updated: project.last_updated,
            todo_list: project.tasks.into_iter().map(TaskRecord::from).collect(),
        }
    }
}
