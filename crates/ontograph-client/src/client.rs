//! GraphClient trait: the seam between sessions and transports

use async_trait::async_trait;
use crate::error::ClientResult;
use crate::models::{QueryResult, ServerInfo};

/// A connection to a graph database that runs one statement at a time.
///
/// Implemented by:
/// - `Neo4jHttpClient` - Neo4j HTTP transactional API
/// - `RecordingClient` - in-process, records statements (tests, dry runs)
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Check that the server is reachable and the credentials work
    async fn verify(&self) -> ClientResult<ServerInfo>;

    /// Execute a single Cypher statement (no terminator)
    async fn run(&self, statement: &str) -> ClientResult<QueryResult>;

    /// Release the connection; later calls fail with `ClientError::Closed`
    async fn close(&self) -> ClientResult<()>;
}
