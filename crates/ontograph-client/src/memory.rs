//! RecordingClient: in-process graph client
//!
//! Records every statement instead of executing it. Used by tests and by
//! dry runs to see exactly what a session would send.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::client::GraphClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{QueryResult, ServerInfo};

/// In-process client that records statements.
#[derive(Default)]
pub struct RecordingClient {
    statements: Mutex<Vec<String>>,
    fail_on: Option<String>,
    unreachable: bool,
    closed: AtomicBool,
}

impl RecordingClient {
    /// Create a client that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any statement containing `marker` with a query error
    pub fn failing_on(marker: impl Into<String>) -> Self {
        Self {
            fail_on: Some(marker.into()),
            ..Self::default()
        }
    }

    /// A client whose server cannot be reached
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Statements accepted so far, in order
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> ClientResult<()> {
        if self.is_closed() {
            Err(ClientError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GraphClient for RecordingClient {
    async fn verify(&self) -> ClientResult<ServerInfo> {
        self.ensure_open()?;
        if self.unreachable {
            return Err(ClientError::ConnectionError("in-process server unreachable".to_string()));
        }
        Ok(ServerInfo {
            address: "in-process".to_string(),
            version: Some(ontograph::VERSION.to_string()),
            edition: Some("in-process".to_string()),
        })
    }

    async fn run(&self, statement: &str) -> ClientResult<QueryResult> {
        self.ensure_open()?;
        if self.unreachable {
            return Err(ClientError::ConnectionError("in-process server unreachable".to_string()));
        }
        if let Some(marker) = &self.fail_on {
            if statement.contains(marker.as_str()) {
                return Err(ClientError::QueryError {
                    code: "Recording.Rejected".to_string(),
                    message: format!("statement contains {:?}", marker),
                });
            }
        }
        self.statements
            .lock()
            .map_err(|_| ClientError::ConnectionError("recording lock poisoned".to_string()))?
            .push(statement.to_string());
        Ok(QueryResult::default())
    }

    async fn close(&self) -> ClientResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_in_order() {
        let client = RecordingClient::new();
        client.run("RETURN 1").await.unwrap();
        client.run("RETURN 2").await.unwrap();
        assert_eq!(client.statements(), vec!["RETURN 1", "RETURN 2"]);
    }

    #[tokio::test]
    async fn test_failing_on_marker() {
        let client = RecordingClient::failing_on("BOOM");
        assert!(client.run("RETURN 1").await.is_ok());
        assert!(matches!(
            client.run("MERGE (n:BOOM)").await,
            Err(ClientError::QueryError { .. })
        ));
        assert_eq!(client.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable() {
        let client = RecordingClient::unreachable();
        assert!(matches!(client.verify().await, Err(ClientError::ConnectionError(_))));
    }
}
