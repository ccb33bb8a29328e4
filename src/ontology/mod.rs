//! Ontology data model
//!
//! Object types, link types and the property catalog that describe the
//! business domain independently of any data instances.

pub mod seed;
pub mod snapshot;
pub mod types;

pub use snapshot::OntologySnapshot;
pub use types::{
    ActionType, DataType, LinkType, NewWritebackAction, ObjectSource, ObjectType, OntologyData,
    Property, PropertyType, WritebackAction, WritebackStatus, WritebackUpdate, NEO4J_LABEL_KEY,
};
