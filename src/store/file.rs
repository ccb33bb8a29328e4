//! Ontology snapshots on disk (JSON or YAML)

use super::{OntologyStore, StoreError, StoreResult};
use crate::ontology::{LinkType, ObjectType, OntologyData, PropertyType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk encoding, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

pub fn load_ontology(path: impl AsRef<Path>) -> StoreResult<OntologyData> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let data: OntologyData = match format {
        SnapshotFormat::Json => serde_json::from_str(&text)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(&text)?,
    };
    info!(
        "Loaded ontology from {:?}: {} object types, {} link types",
        path,
        data.object_types.len(),
        data.link_types.len()
    );
    Ok(data)
}

pub fn save_ontology(path: impl AsRef<Path>, data: &OntologyData) -> StoreResult<()> {
    let path = path.as_ref();
    let text = match SnapshotFormat::from_path(path)? {
        SnapshotFormat::Json => serde_json::to_string_pretty(data)?,
        SnapshotFormat::Yaml => serde_yaml::to_string(data)?,
    };
    fs::write(path, text)?;
    debug!("Saved ontology to {:?}", path);
    Ok(())
}

/// Read-only store backed by a snapshot file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    data: OntologyData,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let data = load_ontology(&path)?;
        Ok(Self { path, data })
    }

    /// Re-read the file, replacing the cached data wholesale
    pub fn reload(&mut self) -> StoreResult<()> {
        self.data = load_ontology(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &OntologyData {
        &self.data
    }
}

impl OntologyStore for FileStore {
    fn list_object_types(&self) -> StoreResult<Vec<ObjectType>> {
        Ok(self.data.object_types.clone())
    }

    fn list_link_types(&self) -> StoreResult<Vec<LinkType>> {
        Ok(self.data.link_types.clone())
    }

    fn list_property_types(&self) -> StoreResult<Vec<PropertyType>> {
        Ok(self.data.property_types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::seed::reference_dataset;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a/schema.JSON")).unwrap(),
            SnapshotFormat::Json
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("schema.yml")).unwrap(),
            SnapshotFormat::Yaml
        );
        assert!(matches!(
            SnapshotFormat::from_path(Path::new("schema.toml")),
            Err(StoreError::UnsupportedFormat(_))
        ));
        assert!(SnapshotFormat::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn test_save_and_open() {
        let temp_dir = TempDir::new().unwrap();
        for file in ["ontology.json", "ontology.yaml"] {
            let path = temp_dir.path().join(file);
            save_ontology(&path, &reference_dataset()).unwrap();

            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.data(), &reference_dataset());
            assert_eq!(store.snapshot().unwrap().link_types.len(), 10);
        }
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ontology.json");
        save_ontology(&path, &OntologyData::default()).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.list_object_types().unwrap().is_empty());

        save_ontology(&path, &reference_dataset()).unwrap();
        store.reload().unwrap();
        assert_eq!(store.list_object_types().unwrap().len(), 10);
    }

    #[test]
    fn test_minimal_json_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("minimal.json");
        fs::write(
            &path,
            r#"{"objectTypes": [{"name": "Factory A"}], "linkTypes": []}"#,
        )
        .unwrap();

        let data = load_ontology(&path).unwrap();
        assert_eq!(data.object_types[0].name, "Factory A");
        assert!(data.object_types[0].properties.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_ontology("/nonexistent/ontology.json"),
            Err(StoreError::Io(_))
        ));
    }
}
