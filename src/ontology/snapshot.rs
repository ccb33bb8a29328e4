//! Point-in-time view of an ontology schema

use super::types::{LinkType, ObjectType, OntologyData, PropertyType};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the schema collections the compiler consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OntologySnapshot {
    pub object_types: Vec<ObjectType>,
    pub link_types: Vec<LinkType>,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
}

impl OntologySnapshot {
    pub fn new(object_types: Vec<ObjectType>, link_types: Vec<LinkType>) -> Self {
        Self {
            object_types,
            link_types,
            property_types: Vec::new(),
        }
    }

    /// First object type with the given name, in input order
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.iter().find(|o| o.name == name)
    }

    pub fn contains_object_type(&self, name: &str) -> bool {
        self.object_type(name).is_some()
    }

    /// Link types whose source or target is the named object type
    pub fn links_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a LinkType> + 'a {
        self.link_types
            .iter()
            .filter(move |l| l.from_type == name || l.to_type == name)
    }

    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty() && self.link_types.is_empty()
    }
}

impl From<&OntologyData> for OntologySnapshot {
    fn from(data: &OntologyData) -> Self {
        Self {
            object_types: data.object_types.clone(),
            link_types: data.link_types.clone(),
            property_types: data.property_types.clone(),
        }
    }
}
