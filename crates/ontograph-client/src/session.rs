//! GraphSession: an explicit, closable handle on one graph connection
//!
//! Whoever needs to execute scripts is handed a session; there is no
//! process-wide driver.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use ontograph::cypher::executable_statements;

use crate::client::GraphClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{QueryResult, RunSummary, ServerInfo};

/// A verified connection that runs compiled scripts statement by statement.
pub struct GraphSession<C: GraphClient> {
    client: C,
    server: ServerInfo,
    timeout: Duration,
}

async fn bounded<T>(
    timeout: Duration,
    fut: impl Future<Output = ClientResult<T>>,
) -> ClientResult<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| ClientError::Timeout(timeout))?
}

impl<C: GraphClient> GraphSession<C> {
    /// Verify the client and wrap it in a session.
    ///
    /// `timeout` bounds the verification and every statement round trip.
    pub async fn connect(client: C, timeout: Duration) -> ClientResult<Self> {
        let server = bounded(timeout, client.verify()).await?;
        info!(
            "Connected to graph database at {} (version {})",
            server.address,
            server.version.as_deref().unwrap_or("unknown")
        );
        Ok(Self {
            client,
            server,
            timeout,
        })
    }

    pub fn server(&self) -> &ServerInfo {
        &self.server
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one statement under the session timeout
    pub async fn run(&self, statement: &str) -> ClientResult<QueryResult> {
        bounded(self.timeout, self.client.run(statement)).await
    }

    /// Split a script into statements and run them in order.
    ///
    /// Comment-only fragments are skipped. The first failure stops the run
    /// and is reported as `ClientError::StatementFailed` with its position.
    pub async fn run_script(&self, script: &str) -> ClientResult<RunSummary> {
        let statements = executable_statements(script);
        debug!("Running script with {} statements", statements.len());

        let mut summary = RunSummary::default();
        for (index, statement) in statements.into_iter().enumerate() {
            match self.run(&statement).await {
                Ok(result) => {
                    summary.executed += 1;
                    summary.last_result = Some(result);
                }
                Err(err) => {
                    warn!("Statement {} failed: {}", index, err);
                    return Err(ClientError::StatementFailed {
                        index,
                        statement,
                        source: Box::new(err),
                    });
                }
            }
        }

        info!("Executed {} statements", summary.executed);
        Ok(summary)
    }

    /// Close the underlying connection
    pub async fn disconnect(self) -> ClientResult<()> {
        self.client.close().await?;
        debug!("Disconnected from {}", self.server.address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingClient;
    use async_trait::async_trait;
    use ontograph::ontology::{LinkType, ObjectType};
    use ontograph::SchemaCompiler;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_connect_reports_server() {
        let session = GraphSession::connect(RecordingClient::new(), TIMEOUT).await.unwrap();
        assert_eq!(session.server().address, "in-process");
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let result = GraphSession::connect(RecordingClient::unreachable(), TIMEOUT).await;
        assert!(matches!(result, Err(ClientError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_run_compiled_script() {
        let types = vec![ObjectType::new("Line"), ObjectType::new("Chip")];
        let links = vec![LinkType::new("consumes", "Line", "Chip")];
        let script = SchemaCompiler::new().compile(&types, &links);

        let session = GraphSession::connect(RecordingClient::new(), TIMEOUT).await.unwrap();
        let summary = session.run_script(&script.render()).await.unwrap();
        assert_eq!(summary.executed, 5);

        let sent = session.client().statements();
        let expected: Vec<String> = script.statements.iter().map(|s| s.text.clone()).collect();
        assert_eq!(sent, expected);
        assert!(sent.iter().all(|s| !s.contains("//")));
    }

    #[tokio::test]
    async fn test_empty_script_runs_nothing() {
        let script = SchemaCompiler::new().compile(&[], &[]);
        let session = GraphSession::connect(RecordingClient::new(), TIMEOUT).await.unwrap();
        let summary = session.run_script(&script.render()).await.unwrap();
        assert_eq!(summary.executed, 0);
        assert!(summary.last_result.is_none());
        assert!(session.client().statements().is_empty());
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let types = vec![
            ObjectType::new("A"),
            ObjectType::new("Broken"),
            ObjectType::new("C"),
        ];
        let script = SchemaCompiler::new().compile(&types, &[]);

        let session = GraphSession::connect(RecordingClient::failing_on("Broken"), TIMEOUT)
            .await
            .unwrap();
        let err = session.run_script(&script.render()).await.unwrap_err();

        assert_eq!(err.failed_statement(), Some(1));
        match err {
            ClientError::StatementFailed { statement, source, .. } => {
                assert!(statement.contains("n:Broken"));
                assert!(matches!(*source, ClientError::QueryError { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
        // Only the first constraint made it through
        assert_eq!(session.client().statements().len(), 1);
    }

    struct StalledClient;

    #[async_trait]
    impl GraphClient for StalledClient {
        async fn verify(&self) -> ClientResult<ServerInfo> {
            Ok(ServerInfo {
                address: "stalled".to_string(),
                version: None,
                edition: None,
            })
        }

        async fn run(&self, _statement: &str) -> ClientResult<QueryResult> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(QueryResult::default())
        }

        async fn close(&self) -> ClientResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_statement_timeout() {
        let session = GraphSession::connect(StalledClient, Duration::from_millis(20))
            .await
            .unwrap();
        let err = session.run_script("RETURN 1;").await.unwrap_err();
        match err {
            ClientError::StatementFailed { index, source, .. } => {
                assert_eq!(index, 0);
                assert!(matches!(*source, ClientError::Timeout(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_disconnect_closes_client() {
        let session = GraphSession::connect(RecordingClient::new(), TIMEOUT).await.unwrap();
        session.disconnect().await.unwrap();
    }
}
