//! Data models shared by every client implementation

use serde::{Deserialize, Serialize};

/// Result of running one statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Tabular result rows
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    /// Number of result rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What the server reported when the connection was verified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Endpoint the client talks to
    pub address: String,
    /// Server version, when the server discloses it
    pub version: Option<String>,
    /// e.g. "community", "enterprise", "in-process"
    pub edition: Option<String>,
}

/// Outcome of a successful script run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Statements executed, in order
    pub executed: usize,
    /// Result of the final statement
    pub last_result: Option<QueryResult>,
}
