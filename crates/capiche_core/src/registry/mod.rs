//! Project registry and its persistence contract.
//!
//! # Responsibility
//! - Index projects by id and expose CRUD plus bulk export/import.
//! - Mirror registry state into a `KeyValueStore` on explicit request.
//!
//! # Invariants
//! - The registry never saves implicitly.
//! - Explicit text parsing is strict; loading from the store degrades to an
//!   empty registry instead of failing.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::store::StoreError;

pub mod project_list;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors from registry operations.
#[derive(Debug)]
pub enum RegistryError {
    /// Project id is missing (empty or blank).
    InvalidProject(String),
    /// Text is not a valid encoding of project records.
    MalformedData(String),
    /// Records could not be encoded.
    Serialize(String),
    /// Store read/write failed.
    Store(StoreError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProject(message) => write!(f, "invalid project: {message}"),
            Self::MalformedData(message) => write!(f, "malformed project data: {message}"),
            Self::Serialize(message) => write!(f, "failed to encode projects: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidProject(_) | Self::MalformedData(_) | Self::Serialize(_) => None,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
