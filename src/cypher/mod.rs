//! Cypher generation for Neo4j
//!
//! - `compiler`: ontology schema to idempotent Cypher script
//! - `escape`: identifier and string literal rendering
//! - `script`: splitting a script back into executable statements

pub mod compiler;
pub mod escape;
pub mod script;

pub use compiler::{
    compile, resolve_label, resolve_relationship_type, CompileWarning, CompiledScript,
    SchemaCompiler, Statement, StatementKind, ONTOLOGY_TYPE_LABEL,
};
pub use escape::{IdentifierError, COMMENT_MARKER, STATEMENT_DELIMITER};
pub use script::executable_statements;
