//! Identifier-indexed project registry.
//!
//! # Responsibility
//! - Hold every project keyed by its id.
//! - Export projects as deep-copied records and as JSON text.
//! - Save to / load from a `KeyValueStore` under a configured key.
//!
//! # Invariants
//! - Entries added through `add` are keyed by their own id.
//! - Entries restored by `load_from_store` are trusted verbatim; only an
//!   entry (or task) that cannot be decoded at all is dropped.
//! - Every read/export path returns deep copies (`ProjectRecord`).
//! - Iteration order is ascending id order.

use std::collections::BTreeMap;

use log::{info, warn};
use serde_json::Value;

use super::{RegistryError, RegistryResult};
use crate::model::project::{Project, ProjectId, ProjectRecord};
use crate::store::KeyValueStore;

/// Store key used when none (or a blank one) is configured.
pub const DEFAULT_STORAGE_KEY: &str = "projectListData";

/// Registry mapping project ids to projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectList {
    storage_key: String,
    projects: BTreeMap<ProjectId, Project>,
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectList {
    /// Creates an empty registry bound to [`DEFAULT_STORAGE_KEY`].
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            projects: BTreeMap::new(),
        }
    }

    /// Creates an empty registry bound to `storage_key`.
    ///
    /// A blank key falls back to [`DEFAULT_STORAGE_KEY`].
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let storage_key = if storage_key.trim().is_empty() {
            DEFAULT_STORAGE_KEY.to_string()
        } else {
            storage_key
        };
        Self {
            storage_key,
            projects: BTreeMap::new(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Inserts `project`, replacing any project with the same id.
    ///
    /// # Errors
    /// - `RegistryError::InvalidProject` when the id is empty.
    pub fn add(&mut self, project: Project) -> RegistryResult<()> {
        if project.id().is_empty() {
            return Err(RegistryError::InvalidProject(
                "project id is required".to_string(),
            ));
        }
        self.projects.insert(project.id().to_string(), project);
        Ok(())
    }

    /// Inserts a project built from a plain record. Same rules as [`add`].
    ///
    /// [`add`]: ProjectList::add
    pub fn add_record(&mut self, record: ProjectRecord) -> RegistryResult<()> {
        self.add(Project::from_record(record))
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.get_mut(id)
    }

    /// Removes the project with `id`. Returns whether one existed.
    pub fn delete(&mut self, id: &str) -> bool {
        self.projects.remove(id).is_some()
    }

    /// Returns deep copies of every project.
    pub fn get_all(&self) -> Vec<ProjectRecord> {
        self.projects.values().map(Project::snapshot).collect()
    }

    /// Live projects in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn ids(&self) -> Vec<ProjectId> {
        self.projects.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn clear(&mut self) {
        self.projects.clear();
    }

    /// Encodes all projects as a JSON array of records.
    pub fn serialize_to_text(&self) -> RegistryResult<String> {
        serde_json::to_string(&self.get_all())
            .map_err(|err| RegistryError::Serialize(err.to_string()))
    }

    /// Parses a JSON array of records. Does not touch any registry.
    ///
    /// # Errors
    /// - `RegistryError::MalformedData` on invalid JSON or record shape.
    pub fn deserialize_from_text(text: &str) -> RegistryResult<Vec<ProjectRecord>> {
        serde_json::from_str(text).map_err(|err| RegistryError::MalformedData(err.to_string()))
    }

    /// Strictly parses `text` and replaces the registry contents with it.
    ///
    /// The registry is left unchanged when parsing or validation fails.
    /// Returns the number of projects now held.
    pub fn replace_from_text(&mut self, text: &str) -> RegistryResult<usize> {
        let records = Self::deserialize_from_text(text)?;
        let mut replacement = Self::with_storage_key(self.storage_key.clone());
        for record in records {
            replacement.add_record(record)?;
        }
        self.projects = replacement.projects;
        Ok(self.projects.len())
    }

    /// Writes the full id → record mapping under the storage key.
    ///
    /// Overwrites whatever the store held under that key.
    pub fn save_to_store<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> RegistryResult<()> {
        let mapping: BTreeMap<&str, ProjectRecord> = self
            .projects
            .iter()
            .map(|(id, project)| (id.as_str(), project.snapshot()))
            .collect();
        let text =
            serde_json::to_string(&mapping).map_err(|err| RegistryError::Serialize(err.to_string()))?;

        if let Err(err) = store.set_item(&self.storage_key, &text) {
            warn!(
                "event=project_list_save module=registry status=error projects={} error={}",
                mapping.len(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=project_list_save module=registry status=ok projects={} bytes={}",
            mapping.len(),
            text.len()
        );
        Ok(())
    }

    /// Replaces the registry contents with the mapping stored under the key.
    ///
    /// Never fails: an absent key, a store error, unparsable text or a
    /// non-object value all leave the registry empty. Inside a valid mapping,
    /// entries and tasks that cannot be decoded are skipped with a warning
    /// and the rest load as stored. Returns the number of projects loaded.
    pub fn load_from_store<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> usize {
        self.projects.clear();

        let raw = match store.get_item(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=project_list_load module=registry status=empty reason=absent");
                return 0;
            }
            Err(err) => {
                warn!(
                    "event=project_list_load module=registry status=empty reason=store_error error={}",
                    err
                );
                return 0;
            }
        };

        let mapping = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(mapping)) => mapping,
            Ok(_) => {
                warn!("event=project_list_load module=registry status=empty reason=not_object");
                return 0;
            }
            Err(err) => {
                warn!(
                    "event=project_list_load module=registry status=empty reason=malformed error={}",
                    err
                );
                return 0;
            }
        };

        let total = mapping.len();
        for (id, value) in mapping {
            if let Some(record) = decode_entry(&id, value) {
                self.projects.insert(id, Project::from_record(record));
            }
        }

        let skipped = total - self.projects.len();
        let status = if skipped == 0 { "ok" } else { "partial" };
        info!(
            "event=project_list_load module=registry status={} projects={} skipped={}",
            status,
            self.projects.len(),
            skipped
        );
        self.projects.len()
    }
}

/// Decodes one stored project, dropping only the tasks that do not decode.
fn decode_entry(id: &str, value: Value) -> Option<ProjectRecord> {
    let Value::Object(mut fields) = value else {
        warn!("event=project_entry_skip module=registry project_id={id} reason=not_object");
        return None;
    };
    let raw_tasks = match fields.remove("todoList") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            warn!("event=project_tasks_skip module=registry project_id={id} reason=not_array");
            Vec::new()
        }
    };

    let mut record = match serde_json::from_value::<ProjectRecord>(Value::Object(fields)) {
        Ok(record) => record,
        Err(err) => {
            warn!(
                "event=project_entry_skip module=registry project_id={id} reason=undecodable error={err}"
            );
            return None;
        }
    };

    let task_count = raw_tasks.len();
    record.todo_list = raw_tasks
        .into_iter()
        .filter_map(|task| serde_json::from_value(task).ok())
        .collect();
    let dropped = task_count - record.todo_list.len();
    if dropped > 0 {
        warn!(
            "event=project_tasks_skip module=registry project_id={id} reason=undecodable dropped={dropped}"
        );
    }
    Some(record)
}
