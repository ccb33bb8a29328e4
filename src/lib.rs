//! Ontograph
//!
//! Manufacturing ontology model and a schema compiler that turns it into
//! an idempotent Neo4j Cypher script.
//!
//! # Components
//!
//! - `ontology`: object types, link types, property catalog, write-back
//!   actions and the reference dataset
//! - `cypher`: the schema compiler and script splitting
//! - `store`: in-memory store with live snapshots, file snapshots
//! - `scenario`: category-keyed what-if rule table
//! - `config`: connection and compiler settings
//!
//! ## Example Usage
//!
//! ```rust
//! use ontograph::cypher::{executable_statements, SchemaCompiler};
//! use ontograph::ontology::{LinkType, ObjectType};
//!
//! let types = vec![
//!     ObjectType::new("Line").with_label("ProductionLine"),
//!     ObjectType::new("Chip"),
//! ];
//! let links = vec![LinkType::new("consumes", "Line", "Chip")];
//!
//! let script = SchemaCompiler::new().compile(&types, &links);
//! assert!(script.warnings.is_empty());
//!
//! // Two constraints, two type markers, one relationship
//! assert_eq!(executable_statements(&script.render()).len(), 5);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod cypher;
pub mod ontology;
pub mod scenario;
pub mod store;

pub use config::{CompilerSettings, ConfigError, ConfigResult, Neo4jConfig, OntographConfig};
pub use cypher::{compile, CompileWarning, CompiledScript, SchemaCompiler};
pub use ontology::{LinkType, ObjectType, OntologyData, OntologySnapshot};
pub use scenario::{ScenarioCategory, ScenarioRules};
pub use store::{MemoryStore, OntologyStore, StoreError, StoreResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
