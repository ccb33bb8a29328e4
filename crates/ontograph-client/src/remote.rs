//! Neo4jHttpClient: network client for a running Neo4j server
//!
//! Talks to the HTTP transactional endpoint
//! (`POST /db/{database}/tx/commit`), one auto-committed transaction per
//! statement.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use ontograph::Neo4jConfig;

use crate::client::GraphClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{QueryResult, ServerInfo};

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    #[serde(default)]
    row: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Discovery {
    neo4j_version: Option<String>,
    neo4j_edition: Option<String>,
}

/// Network client for Neo4j's HTTP API.
pub struct Neo4jHttpClient {
    base_url: String,
    database: String,
    user: String,
    password: String,
    timeout: Duration,
    http_client: Client,
    closed: AtomicBool,
}

impl Neo4jHttpClient {
    /// Create a client from connection settings.
    ///
    /// No request is made until `verify` or `run`.
    ///
    /// # Example
    /// ```no_run
    /// # use ontograph::Neo4jConfig;
    /// # use ontograph_client::Neo4jHttpClient;
    /// let client = Neo4jHttpClient::new(&Neo4jConfig::default()).unwrap();
    /// ```
    pub fn new(config: &Neo4jConfig) -> ClientResult<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: config.uri.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            user: config.user.clone(),
            password: config.password.clone(),
            timeout,
            http_client,
            closed: AtomicBool::new(false),
        })
    }

    fn commit_url(&self) -> String {
        format!("{}/db/{}/tx/commit", self.base_url, self.database)
    }

    fn ensure_open(&self) -> ClientResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(ClientError::Closed)
        } else {
            Ok(())
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else if err.is_connect() {
            ClientError::ConnectionError(format!("{}: {}", self.base_url, err))
        } else {
            ClientError::HttpError(err)
        }
    }

    async fn post_statement(&self, statement: &str) -> ClientResult<QueryResult> {
        let response = self
            .http_client
            .post(self.commit_url())
            .basic_auth(&self.user, Some(&self.password))
            .json(&request_body(statement))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ClientError::ConnectionError(format!(
                    "authentication failed for user {}",
                    self.user
                )));
            }
            status if !status.is_success() => {
                return Err(ClientError::ConnectionError(format!(
                    "{} returned {}",
                    self.commit_url(),
                    status
                )));
            }
            _ => {}
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        parse_response(&body)
    }
}

/// JSON body for a single-statement commit
pub(crate) fn request_body(statement: &str) -> serde_json::Value {
    serde_json::json!({ "statements": [{ "statement": statement }] })
}

/// Turn a commit response into a result, surfacing the first server error
pub(crate) fn parse_response(body: &str) -> ClientResult<QueryResult> {
    let response: TxResponse = serde_json::from_str(body)?;
    if let Some(err) = response.errors.into_iter().next() {
        return Err(ClientError::QueryError {
            code: err.code,
            message: err.message,
        });
    }
    Ok(response
        .results
        .into_iter()
        .next()
        .map(|r| QueryResult {
            columns: r.columns,
            rows: r.data.into_iter().map(|d| d.row).collect(),
        })
        .unwrap_or_default())
}

#[async_trait]
impl GraphClient for Neo4jHttpClient {
    async fn verify(&self) -> ClientResult<ServerInfo> {
        self.ensure_open()?;

        let response = self
            .http_client
            .get(format!("{}/", self.base_url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        let discovery: Discovery = if response.status().is_success() {
            response.json().await.unwrap_or(Discovery {
                neo4j_version: None,
                neo4j_edition: None,
            })
        } else {
            return Err(ClientError::ConnectionError(format!(
                "Discovery endpoint returned {}",
                response.status()
            )));
        };

        // Credentials are only checked once a statement is sent
        self.post_statement("RETURN 1").await?;
        debug!("Verified Neo4j at {}", self.base_url);

        Ok(ServerInfo {
            address: self.base_url.clone(),
            version: discovery.neo4j_version,
            edition: discovery.neo4j_edition,
        })
    }

    async fn run(&self, statement: &str) -> ClientResult<QueryResult> {
        self.ensure_open()?;
        self.post_statement(statement).await
    }

    async fn close(&self) -> ClientResult<()> {
        // HTTP is stateless; closing only blocks further use
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
