//! Ontology schema types
//!
//! Object types, link types and the global property catalog, plus the
//! write-back action records kept next to them in the ontology store.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata key that overrides the graph node label of an object type
pub const NEO4J_LABEL_KEY: &str = "neo4j_label";

/// Where a schema element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectSource {
    #[default]
    Manual,
    AiMapped,
}

impl ObjectSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectSource::Manual => "manual",
            ObjectSource::AiMapped => "ai-mapped",
        }
    }
}

impl fmt::Display for ObjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property declared on an object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Free-form type tag ("string", "number", ...)
    #[serde(rename = "type", default)]
    pub type_tag: String,
    #[serde(default)]
    pub required: bool,
}

impl Property {
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_tag: type_tag.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A class of real-world entity (analogous to a node label)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(default)]
    pub id: String,
    /// Unique within a schema; link types join on it
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub source: ObjectSource,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            properties: Vec::new(),
            source: ObjectSource::Manual,
            metadata: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_source(mut self, source: ObjectSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata
            .insert(NEO4J_LABEL_KEY.to_string(), serde_json::Value::String(label.into()));
        self
    }

    /// The explicit `neo4j_label` override, if present and non-blank
    pub fn label_override(&self) -> Option<&str> {
        self.metadata
            .get(NEO4J_LABEL_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

/// A class of directed relationship between two object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Object type *name* of the source end
    pub from_type: String,
    /// Object type *name* of the target end
    pub to_type: String,
    #[serde(default)]
    pub bidirectional: bool,
    /// Explicit relationship type, overrides the name-derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neo4j_type: Option<String>,
}

impl LinkType {
    pub fn new(
        name: impl Into<String>,
        from_type: impl Into<String>,
        to_type: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            from_type: from_type.into(),
            to_type: to_type.into(),
            bidirectional: false,
            neo4j_type: None,
        }
    }

    pub fn bidirectional(mut self) -> Self {
        self.bidirectional = true;
        self
    }

    pub fn with_neo4j_type(mut self, relationship_type: impl Into<String>) -> Self {
        self.neo4j_type = Some(relationship_type.into());
        self
    }

    /// Name the relationship type is derived from
    pub fn relationship_source(&self) -> &str {
        match self.neo4j_type.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.name,
        }
    }
}

/// Value type of a catalog property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    Json,
}

/// A named, typed attribute shared across object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Names of the object types using this property
    #[serde(default)]
    pub used_by: Vec<String>,
    #[serde(default)]
    pub source: ObjectSource,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            data_type,
            description: String::new(),
            validation: None,
            default_value: None,
            used_by: Vec::new(),
            source: ObjectSource::Manual,
        }
    }
}

/// An operational action that can be written back to source systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_systems: Vec<String>,
    #[serde(default)]
    pub affected_modules: Vec<String>,
}

/// Lifecycle of a write-back action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WritebackStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl WritebackStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WritebackStatus::Completed | WritebackStatus::Failed)
    }
}

/// A decision being pushed back into operational systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritebackAction {
    pub id: String,
    pub action_type_id: String,
    pub decision: String,
    pub status: WritebackStatus,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub logs: Vec<String>,
    pub results: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when starting a write-back action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewWritebackAction {
    pub action_type_id: String,
    pub decision: String,
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Partial update of a write-back action; `None` leaves a field untouched
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WritebackUpdate {
    pub status: Option<WritebackStatus>,
    pub progress: Option<u8>,
    /// Appended to the existing log
    pub append_logs: Vec<String>,
    /// Replaces the existing results when set
    pub results: Option<Vec<serde_json::Value>>,
}

/// The complete replaceable dataset of an ontology store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OntologyData {
    #[serde(default)]
    pub object_types: Vec<ObjectType>,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
    #[serde(default)]
    pub link_types: Vec<LinkType>,
    #[serde(default)]
    pub action_types: Vec<ActionType>,
}
