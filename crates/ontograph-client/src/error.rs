//! Error types for the graph execution client

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the graph database
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server unreachable or refused the credentials
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server rejected a statement
    #[error("Query error: {code}: {message}")]
    QueryError { code: String, message: String },

    /// A statement of a script failed; later statements were not run
    #[error("Statement {index} failed: {source}\n{statement}")]
    StatementFailed {
        /// Zero-based position among the executable statements
        index: usize,
        statement: String,
        #[source]
        source: Box<ClientError>,
    },

    /// No reply within the configured bound
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The session was already closed
    #[error("Client is closed")]
    Closed,

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ClientError {
    /// Position of the failing statement, when this came out of a script run
    pub fn failed_statement(&self) -> Option<usize> {
        match self {
            ClientError::StatementFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
