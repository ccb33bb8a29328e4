//! Configuration
//!
//! Loaded from a YAML or JSON file, then overridden from `ONTOGRAPH_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Graph database connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// HTTP endpoint of the server
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound for a single statement round trip
    pub timeout_ms: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Compiler switches exposed through config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    pub include_examples: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            include_examples: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntographConfig {
    pub neo4j: Neo4jConfig,
    pub compiler: CompilerSettings,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for OntographConfig {
    fn default() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            compiler: CompilerSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl OntographConfig {
    /// Parse a config file; format is chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            Some("json") => {
                serde_json::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Optional file, then the process environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let env: HashMap<String, String> = std::env::vars().collect();
        config.apply_overrides(&env)?;
        Ok(config)
    }

    /// Apply `ONTOGRAPH_*` overrides from a variable map
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> ConfigResult<()> {
        if let Some(v) = vars.get("ONTOGRAPH_NEO4J_URI") {
            self.neo4j.uri = v.clone();
        }
        if let Some(v) = vars.get("ONTOGRAPH_NEO4J_USER") {
            self.neo4j.user = v.clone();
        }
        if let Some(v) = vars.get("ONTOGRAPH_NEO4J_PASSWORD") {
            self.neo4j.password = v.clone();
        }
        if let Some(v) = vars.get("ONTOGRAPH_NEO4J_DATABASE") {
            self.neo4j.database = v.clone();
        }
        if let Some(v) = vars.get("ONTOGRAPH_NEO4J_TIMEOUT_MS") {
            self.neo4j.timeout_ms = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "ONTOGRAPH_NEO4J_TIMEOUT_MS".to_string(),
                value: v.clone(),
            })?;
        }
        if let Some(v) = vars.get("ONTOGRAPH_LOG") {
            self.log_level = v.clone();
        }
        Ok(())
    }
}
