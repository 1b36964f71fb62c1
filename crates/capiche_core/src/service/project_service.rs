//! Project/task use-case service.
//!
//! # Responsibility
//! - Provide the synchronous entry points the UI calls on user input.
//! - Own the registry and its store, both injected at construction.
//!
//! # Invariants
//! - Loading happens only in `open`/`reload`; saving only in `save`.
//! - New tasks carry their project's current name as parent reference.
//! - Service calls never re-render or notify; the caller refreshes the UI.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::model::project::{Project, ProjectId, ProjectRecord};
use crate::model::task::{ModelError, Task, TaskEdit, TaskId, TaskRecord};
use crate::registry::project_list::ProjectList;
use crate::registry::RegistryError;
use crate::store::KeyValueStore;
use crate::view::SidebarView;

/// Name of the project `ensure_home_project` finds or creates.
pub const DEFAULT_HOME_PROJECT_NAME: &str = "Home";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from project service use cases.
#[derive(Debug)]
pub enum ServiceError {
    ProjectNotFound(ProjectId),
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
    Model(ModelError),
    Registry(RegistryError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound {
                project_id,
                task_id,
            } => write!(f, "task not found: {task_id} in project {project_id}"),
            Self::Model(err) => write!(f, "{err}"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::ProjectNotFound(_) | Self::TaskNotFound { .. } => None,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<RegistryError> for ServiceError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// A task listed in a sidebar view, with the project that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTask {
    pub project_id: ProjectId,
    pub task: TaskRecord,
}

/// Use-case service over a project registry and its backing store.
pub struct ProjectService<S: KeyValueStore> {
    store: S,
    projects: ProjectList,
}

impl<S: KeyValueStore> ProjectService<S> {
    /// Wraps an already-populated registry. Nothing is loaded.
    pub fn new(store: S, projects: ProjectList) -> Self {
        Self { store, projects }
    }

    /// Creates a registry bound to `storage_key` and loads it from `store`.
    pub fn open(store: S, storage_key: impl Into<String>) -> Self {
        let mut projects = ProjectList::with_storage_key(storage_key);
        projects.load_from_store(&store);
        Self { store, projects }
    }

    /// Discards in-memory state and reloads from the store.
    pub fn reload(&mut self) -> usize {
        self.projects.load_from_store(&self.store)
    }

    /// Writes the registry to the store.
    pub fn save(&mut self) -> ServiceResult<()> {
        self.projects.save_to_store(&mut self.store)?;
        Ok(())
    }

    /// Returns the id of the project named [`DEFAULT_HOME_PROJECT_NAME`],
    /// creating it first when no such project exists.
    pub fn ensure_home_project(&mut self) -> ServiceResult<ProjectId> {
        if let Some(existing) = self
            .projects
            .iter()
            .find(|project| project.name() == DEFAULT_HOME_PROJECT_NAME)
        {
            return Ok(existing.id().to_string());
        }
        self.create_project(DEFAULT_HOME_PROJECT_NAME, "")
    }

    pub fn projects(&self) -> Vec<ProjectRecord> {
        self.projects.get_all()
    }

    pub fn project(&self, project_id: &str) -> Option<ProjectRecord> {
        self.projects.get(project_id).map(Project::snapshot)
    }

    pub fn project_list(&self) -> &ProjectList {
        &self.projects
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (S, ProjectList) {
        (self.store, self.projects)
    }

    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ServiceResult<ProjectId> {
        let project = Project::new(name, description);
        let id = project.id().to_string();
        self.projects.add(project)?;
        debug!("event=project_create module=service status=ok project_id={id}");
        Ok(id)
    }

    pub fn update_project(
        &mut self,
        project_id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> ServiceResult<()> {
        self.project_mut(project_id)?.update(name, description);
        Ok(())
    }

    /// Removes a project and, with it, all of its tasks.
    pub fn delete_project(&mut self, project_id: &str) -> bool {
        let removed = self.projects.delete(project_id);
        debug!(
            "event=project_delete module=service status=ok project_id={project_id} removed={removed}"
        );
        removed
    }

    /// Creates a task from form input and appends it to the project.
    ///
    /// # Errors
    /// - `ServiceError::ProjectNotFound` for an unknown project.
    /// - `ServiceError::Model(InvalidPriority)` for bad priority text.
    pub fn add_task(
        &mut self,
        project_id: &str,
        name: impl Into<String>,
        detail: impl Into<String>,
        due_date: DateTime<Utc>,
        priority: &str,
    ) -> ServiceResult<TaskId> {
        let project = self.project_mut(project_id)?;
        let task = Task::try_new(name, detail, project.name(), due_date, priority)?;
        let task_id = task.id().to_string();
        project.add_task(task);
        debug!(
            "event=task_create module=service status=ok project_id={project_id} task_id={task_id}"
        );
        Ok(task_id)
    }

    pub fn edit_task(&mut self, project_id: &str, task_id: &str, patch: TaskEdit) -> ServiceResult<()> {
        if self.project_mut(project_id)?.edit_task(task_id, patch) {
            Ok(())
        } else {
            Err(task_not_found(project_id, task_id))
        }
    }

    /// Toggles completion. Returns the new completed state.
    pub fn toggle_task(&mut self, project_id: &str, task_id: &str) -> ServiceResult<bool> {
        self.project_mut(project_id)?
            .toggle_task(task_id)
            .ok_or_else(|| task_not_found(project_id, task_id))
    }

    /// Removes a task. Returns whether a task was removed; an unknown task
    /// id is not an error.
    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> ServiceResult<bool> {
        Ok(self.project_mut(project_id)?.delete_task(task_id))
    }

    /// Lists tasks visible in `view` on `today`, in project-id then
    /// insertion order.
    pub fn tasks_for_view(&self, view: SidebarView, today: NaiveDate) -> Vec<ViewTask> {
        self.projects
            .iter()
            .flat_map(|project| {
                project
                    .tasks()
                    .iter()
                    .filter(move |task| view.includes(task, today))
                    .map(move |task| ViewTask {
                        project_id: project.id().to_string(),
                        task: task.read(),
                    })
            })
            .collect()
    }

    fn project_mut(&mut self, project_id: &str) -> ServiceResult<&mut Project> {
        self.projects
            .get_mut(project_id)
            .ok_or_else(|| ServiceError::ProjectNotFound(project_id.to_string()))
    }
}

fn task_not_found(project_id: &str, task_id: &str) -> ServiceError {
    ServiceError::TaskNotFound {
        project_id: project_id.to_string(),
        task_id: task_id.to_string(),
    }
}
