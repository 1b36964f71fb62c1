//! Core domain logic for the Capiche to-do application.
//! Projects, their tasks, the project registry and its key-value persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::project::{Project, ProjectId, ProjectRecord};
pub use model::task::{
    parse_due_date, ModelError, ModelResult, Priority, Task, TaskEdit, TaskId, TaskRecord,
};
pub use registry::project_list::{ProjectList, DEFAULT_STORAGE_KEY};
pub use registry::{RegistryError, RegistryResult};
pub use service::project_service::{
    ProjectService, ServiceError, ServiceResult, ViewTask, DEFAULT_HOME_PROJECT_NAME,
};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use view::SidebarView;
