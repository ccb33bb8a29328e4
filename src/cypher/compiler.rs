//! Schema compiler
//!
//! Translates an ontology snapshot into an idempotent Neo4j script:
//! uniqueness constraints per node label, `OntologyType` marker nodes per
//! object type and relationship merges between markers per link type.
//!
//! The output is a pure function of the input apart from the header line
//! that records the generation time.

use super::escape::{
    normalize_identifier, normalize_relationship_type, normalize_whitespace, quote_identifier,
    string_literal, IdentifierError, COMMENT_MARKER, STATEMENT_DELIMITER,
};
use crate::ontology::{LinkType, ObjectType, OntologySnapshot};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashSet;
use std::fmt::{self, Write as _};
use thiserror::Error;
use tracing::{debug, warn};

/// Label of the marker node created for every object type
pub const ONTOLOGY_TYPE_LABEL: &str = "OntologyType";

/// First line of every compiled script
pub const SCRIPT_TITLE: &str = "Ontology schema script for Neo4j digital twin";

/// Non-fatal problems found while compiling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    #[error("object type #{index} has an empty name and was skipped")]
    EmptyObjectTypeName { index: usize },

    #[error("object type {name:?} has an unusable label {label:?} ({reason}) and was skipped")]
    InvalidLabel {
        name: String,
        label: String,
        reason: IdentifierError,
    },

    #[error("property {property:?} of object type {name:?} was left out of the example ({reason})")]
    InvalidPropertyName {
        name: String,
        property: String,
        reason: IdentifierError,
    },

    #[error("object type {name:?} is declared more than once")]
    DuplicateObjectType { name: String },

    #[error("link type #{index} has an empty name and was skipped")]
    EmptyLinkName { index: usize },

    #[error("link type {name:?} has an unusable relationship type ({reason}) and was skipped")]
    InvalidRelationshipType { name: String, reason: IdentifierError },

    #[error("link type {name:?} references unknown object type(s): {missing:?}")]
    DanglingLink { name: String, missing: Vec<String> },
}

/// What an executable statement does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Constraint,
    TypeMarker,
    Relationship,
}

/// One executable statement, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub text: String,
}

/// Output of a compilation; regenerated from scratch every time
#[derive(Debug, Clone)]
pub struct CompiledScript {
    pub generated_at: DateTime<Utc>,
    pub statements: Vec<Statement>,
    pub warnings: Vec<CompileWarning>,
    body: String,
}

impl CompiledScript {
    /// Header comment lines
    pub fn header(&self) -> String {
        format!(
            "{COMMENT_MARKER} {SCRIPT_TITLE}\n{COMMENT_MARKER} Generated at: {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// Script text without the header; identical for identical input
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full script text
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        out.push_str(&self.body);
        out
    }

    pub fn statements_of(&self, kind: StatementKind) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(move |s| s.kind == kind)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl fmt::Display for CompiledScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Resolve the graph label of an object type.
///
/// `metadata.neo4j_label` when present and non-blank, otherwise the name;
/// either way whitespace becomes `_`.
pub fn resolve_label(object_type: &ObjectType) -> Result<String, IdentifierError> {
    normalize_identifier(object_type.label_override().unwrap_or(&object_type.name))
}

/// Relationship type token of a link type
pub fn resolve_relationship_type(link_type: &LinkType) -> Result<String, IdentifierError> {
    normalize_relationship_type(link_type.relationship_source())
}

struct ResolvedType<'a> {
    object_type: &'a ObjectType,
    label: String,
}

/// Stateless compiler; cheap to construct and safe to share
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    include_examples: bool,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self {
            include_examples: true,
        }
    }
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the example-instance comment emitted per object type
    pub fn with_examples(mut self, include_examples: bool) -> Self {
        self.include_examples = include_examples;
        self
    }

    pub fn compile(&self, object_types: &[ObjectType], link_types: &[LinkType]) -> CompiledScript {
        self.compile_at(object_types, link_types, Utc::now())
    }

    pub fn compile_snapshot(&self, snapshot: &OntologySnapshot) -> CompiledScript {
        self.compile(&snapshot.object_types, &snapshot.link_types)
    }

    /// Compile with a fixed generation timestamp
    pub fn compile_at(
        &self,
        object_types: &[ObjectType],
        link_types: &[LinkType],
        generated_at: DateTime<Utc>,
    ) -> CompiledScript {
        let mut warnings = Vec::new();
        let resolved = resolve_types(object_types, &mut warnings);

        let mut emitter = Emitter::default();

        emitter.comment("1. Constraints");
        for t in &resolved {
            emitter.statement(
                StatementKind::Constraint,
                format!(
                    "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE n.id IS UNIQUE",
                    quote_identifier(&t.label)
                ),
            );
        }
        emitter.blank();

        emitter.comment("2. Object types");
        for t in &resolved {
            if self.include_examples {
                let example = example_instance(t, &mut warnings);
                emitter.comment(&example);
            }
            let obj = t.object_type;
            emitter.statement(
                StatementKind::TypeMarker,
                format!(
                    "MERGE (t:{ONTOLOGY_TYPE_LABEL} {{name: {}}})\nSET t.description = {}, t.source = {}, t.neo4j_label = {}",
                    string_literal(&obj.name),
                    string_literal(&obj.description),
                    string_literal(obj.source.as_str()),
                    string_literal(&t.label),
                ),
            );
        }
        emitter.blank();

        emitter.comment("3. Link types");
        let known: HashSet<&str> = resolved.iter().map(|t| t.object_type.name.as_str()).collect();
        for (index, link) in link_types.iter().enumerate() {
            if link.name.trim().is_empty() && link.neo4j_type.is_none() {
                warn!("Skipping link type #{} with empty name", index);
                warnings.push(CompileWarning::EmptyLinkName { index });
                continue;
            }
            let rel_type = match resolve_relationship_type(link) {
                Ok(rel_type) => rel_type,
                Err(reason) => {
                    warn!("Skipping link type {:?}: {}", link.name, reason);
                    warnings.push(CompileWarning::InvalidRelationshipType {
                        name: link.name.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let missing: Vec<String> = [&link.from_type, &link.to_type]
                .into_iter()
                .filter(|n| !known.contains(n.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                debug!("Link type {:?} references unknown types {:?}", link.name, missing);
                warnings.push(CompileWarning::DanglingLink {
                    name: link.name.clone(),
                    missing,
                });
            }

            emitter.comment(&format!(
                "Relationship: {} -> {}",
                string_literal(&link.from_type),
                string_literal(&link.to_type)
            ));
            emitter.statement(
                StatementKind::Relationship,
                format!(
                    "MATCH (a:{ONTOLOGY_TYPE_LABEL} {{name: {}}}), (b:{ONTOLOGY_TYPE_LABEL} {{name: {}}})\nMERGE (a)-[r:{}]->(b)\nSET r.bidirectional = {}",
                    string_literal(&link.from_type),
                    string_literal(&link.to_type),
                    quote_identifier(&rel_type),
                    link.bidirectional,
                ),
            );
        }

        debug!(
            "Compiled {} object types and {} link types into {} statements ({} warnings)",
            object_types.len(),
            link_types.len(),
            emitter.statements.len(),
            warnings.len()
        );

        CompiledScript {
            generated_at,
            statements: emitter.statements,
            warnings,
            body: emitter.text,
        }
    }
}

/// Compile with default settings
pub fn compile(object_types: &[ObjectType], link_types: &[LinkType]) -> CompiledScript {
    SchemaCompiler::default().compile(object_types, link_types)
}

fn resolve_types<'a>(
    object_types: &'a [ObjectType],
    warnings: &mut Vec<CompileWarning>,
) -> Vec<ResolvedType<'a>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(object_types.len());

    for (index, obj) in object_types.iter().enumerate() {
        if obj.name.trim().is_empty() {
            warn!("Skipping object type #{} with empty name", index);
            warnings.push(CompileWarning::EmptyObjectTypeName { index });
            continue;
        }
        let label = match resolve_label(obj) {
            Ok(label) => label,
            Err(reason) => {
                warn!("Skipping object type {:?}: {}", obj.name, reason);
                warnings.push(CompileWarning::InvalidLabel {
                    name: obj.name.clone(),
                    label: normalize_whitespace(obj.label_override().unwrap_or(&obj.name)),
                    reason,
                });
                continue;
            }
        };
        if !seen.insert(obj.name.as_str()) {
            warnings.push(CompileWarning::DuplicateObjectType {
                name: obj.name.clone(),
            });
        }
        resolved.push(ResolvedType {
            object_type: obj,
            label,
        });
    }

    resolved
}

fn example_instance(t: &ResolvedType<'_>, warnings: &mut Vec<CompileWarning>) -> String {
    let mut fields = vec!["id: \"placeholder_id\"".to_string()];
    for prop in &t.object_type.properties {
        match normalize_identifier(&prop.name) {
            Ok(key) => fields.push(format!("{}: \"\"", quote_identifier(&key))),
            Err(reason) => warnings.push(CompileWarning::InvalidPropertyName {
                name: t.object_type.name.clone(),
                property: prop.name.clone(),
                reason,
            }),
        }
    }
    format!(
        "Example instance: MERGE (n:{} {{{}}})",
        quote_identifier(&t.label),
        fields.join(", ")
    )
}

#[derive(Default)]
struct Emitter {
    text: String,
    statements: Vec<Statement>,
}

impl Emitter {
    fn comment(&mut self, text: &str) {
        let _ = writeln!(self.text, "{COMMENT_MARKER} {text}");
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn statement(&mut self, kind: StatementKind, text: String) {
        let _ = writeln!(self.text, "{text}{STATEMENT_DELIMITER}");
        self.statements.push(Statement { kind, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::Property;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_resolve_label() {
        assert_eq!(resolve_label(&ObjectType::new("Factory A")).unwrap(), "Factory_A");
        assert_eq!(
            resolve_label(&ObjectType::new("Line").with_label("Production Line")).unwrap(),
            "Production_Line"
        );
        assert_eq!(
            resolve_label(&ObjectType::new("Bad;Name")),
            Err(IdentifierError::Delimiter)
        );
    }

    #[test]
    fn test_header() {
        let script = SchemaCompiler::new().compile_at(&[], &[], fixed_time());
        assert_eq!(
            script.header(),
            "// Ontology schema script for Neo4j digital twin\n// Generated at: 2026-01-02T03:04:05Z\n"
        );
        assert!(script.render().starts_with(&script.header()));
        assert!(script.render().ends_with(script.body()));
    }

    #[test]
    fn test_marker_statement_text() {
        let obj = ObjectType::new("SMT Line")
            .with_description("Surface \"mount\" line")
            .with_property(Property::new("p1", "Utilization", "number"));
        let script = SchemaCompiler::new().compile_at(&[obj], &[], fixed_time());

        let marker = script.statements_of(StatementKind::TypeMarker).next().unwrap();
        assert_eq!(
            marker.text,
            "MERGE (t:OntologyType {name: \"SMT Line\"})\n\
             SET t.description = \"Surface \\\"mount\\\" line\", t.source = \"manual\", t.neo4j_label = \"SMT_Line\""
        );
        assert!(script
            .body()
            .contains("// Example instance: MERGE (n:SMT_Line {id: \"placeholder_id\", Utilization: \"\"})"));
    }

    #[test]
    fn test_without_examples() {
        let obj = ObjectType::new("Line");
        let script = SchemaCompiler::new()
            .with_examples(false)
            .compile_at(&[obj], &[], fixed_time());
        assert!(!script.body().contains("Example instance"));
        assert_eq!(script.statements.len(), 2);
    }

    #[test]
    fn test_skips_unusable_object_types() {
        let types = vec![
            ObjectType::new("  "),
            ObjectType::new("Ok"),
            ObjectType::new("Semi;colon"),
        ];
        let script = SchemaCompiler::new().compile_at(&types, &[], fixed_time());
        assert_eq!(script.statements_of(StatementKind::Constraint).count(), 1);
        assert_eq!(
            script.warnings,
            vec![
                CompileWarning::EmptyObjectTypeName { index: 0 },
                CompileWarning::InvalidLabel {
                    name: "Semi;colon".to_string(),
                    label: "Semi;colon".to_string(),
                    reason: IdentifierError::Delimiter,
                },
            ]
        );
    }

    #[test]
    fn test_label_override_rescues_bad_name() {
        // The name only ever appears inside string literals, so an override label suffices
        let obj = ObjectType::new("Plant; East").with_label("Plant");
        let script = SchemaCompiler::new().compile_at(&[obj], &[], fixed_time());
        assert!(script.warnings.is_empty());
        assert_eq!(script.body().matches(';').count(), script.statements.len());
        assert!(script.body().contains("{name: \"Plant\\u003B East\"}"));
    }

    #[test]
    fn test_invalid_property_left_out_of_example() {
        let obj = ObjectType::new("Line")
            .with_property(Property::new("p1", "a;b", "string"))
            .with_property(Property::new("p2", "Yield Rate", "number"));
        let script = SchemaCompiler::new().compile_at(&[obj], &[], fixed_time());
        assert!(script
            .body()
            .contains("MERGE (n:Line {id: \"placeholder_id\", Yield_Rate: \"\"})"));
        assert!(matches!(
            script.warnings.as_slice(),
            [CompileWarning::InvalidPropertyName { property, .. }] if property == "a;b"
        ));
    }

    #[test]
    fn test_duplicate_object_type_still_emitted() {
        let types = vec![ObjectType::new("Line"), ObjectType::new("Line")];
        let script = SchemaCompiler::new().compile_at(&types, &[], fixed_time());
        assert_eq!(script.statements_of(StatementKind::Constraint).count(), 2);
        assert_eq!(
            script.warnings,
            vec![CompileWarning::DuplicateObjectType { name: "Line".to_string() }]
        );
    }

    #[test]
    fn test_relationship_statement() {
        let types = vec![ObjectType::new("Line"), ObjectType::new("Chip")];
        let links = vec![LinkType::new("consumes", "Line", "Chip").bidirectional()];
        let script = SchemaCompiler::new().compile_at(&types, &links, fixed_time());

        let rel = script.statements_of(StatementKind::Relationship).next().unwrap();
        assert_eq!(
            rel.text,
            "MATCH (a:OntologyType {name: \"Line\"}), (b:OntologyType {name: \"Chip\"})\n\
             MERGE (a)-[r:CONSUMES]->(b)\n\
             SET r.bidirectional = true"
        );
        assert!(script.body().contains("// Relationship: \"Line\" -> \"Chip\"\n"));
    }

    #[test]
    fn test_relationship_type_override() {
        let types = vec![ObjectType::new("A"), ObjectType::new("B")];
        let links = vec![LinkType::new("is supplied by", "A", "B").with_neo4j_type("supplied by")];
        let script = SchemaCompiler::new().compile_at(&types, &links, fixed_time());
        let rel = script.statements_of(StatementKind::Relationship).next().unwrap();
        assert!(rel.text.contains("-[r:SUPPLIED_BY]->"));
    }

    #[test]
    fn test_skips_unusable_links() {
        let types = vec![ObjectType::new("A")];
        let links = vec![
            LinkType::new(" ", "A", "A"),
            LinkType::new("bad;rel", "A", "A"),
        ];
        let script = SchemaCompiler::new().compile_at(&types, &links, fixed_time());
        assert_eq!(script.statements_of(StatementKind::Relationship).count(), 0);
        assert_eq!(script.warnings.len(), 2);
        assert!(matches!(script.warnings[0], CompileWarning::EmptyLinkName { index: 0 }));
        assert!(matches!(
            script.warnings[1],
            CompileWarning::InvalidRelationshipType { reason: IdentifierError::Delimiter, .. }
        ));
    }

    #[test]
    fn test_dangling_link_warns_and_emits() {
        let types = vec![ObjectType::new("A")];
        let links = vec![LinkType::new("SHIPS_TO", "A", "Customer")];
        let script = SchemaCompiler::new().compile_at(&types, &links, fixed_time());
        assert_eq!(script.statements_of(StatementKind::Relationship).count(), 1);
        assert_eq!(
            script.warnings,
            vec![CompileWarning::DanglingLink {
                name: "SHIPS_TO".to_string(),
                missing: vec!["Customer".to_string()],
            }]
        );
    }

    #[test]
    fn test_warning_display() {
        let w = CompileWarning::DanglingLink {
            name: "SHIPS_TO".to_string(),
            missing: vec!["Customer".to_string()],
        };
        assert_eq!(
            w.to_string(),
            "link type \"SHIPS_TO\" references unknown object type(s): [\"Customer\"]"
        );
    }
}
