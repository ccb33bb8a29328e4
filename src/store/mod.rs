//! Ontology store
//!
//! Holds object types, link types, the property catalog and write-back
//! actions. The compiler only ever sees a point-in-time snapshot.

pub mod file;
pub mod memory;

pub use file::{load_ontology, save_ontology, FileStore, SnapshotFormat};
pub use memory::MemoryStore;

use crate::ontology::{LinkType, ObjectType, OntologySnapshot, PropertyType};
use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Name empty after trimming
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// Object type names are the join key for links
    #[error("Object type already exists: {0}")]
    DuplicateObjectType(String),

    #[error("Write-back action not found: {0}")]
    ActionNotFound(String),

    #[error("Invalid progress {0}, expected 0..=100")]
    InvalidProgress(u8),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access the compiler and the CLI need
pub trait OntologyStore {
    fn list_object_types(&self) -> StoreResult<Vec<ObjectType>>;

    fn list_link_types(&self) -> StoreResult<Vec<LinkType>>;

    fn list_property_types(&self) -> StoreResult<Vec<PropertyType>>;

    fn snapshot(&self) -> StoreResult<OntologySnapshot> {
        Ok(OntologySnapshot {
            object_types: self.list_object_types()?,
            link_types: self.list_link_types()?,
            property_types: self.list_property_types()?,
        })
    }
}
