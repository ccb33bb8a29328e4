//! Ontograph client: executes compiled ontology scripts against a graph database
//!
//! Provides two client implementations:
//!
//! - **`Neo4jHttpClient`** - Connects to a running Neo4j server via its HTTP
//!   transactional API.
//! - **`RecordingClient`** - In-process, no network. Records statements
//!   instead of running them. Ideal for tests and dry runs.
//!
//! Both implement the `GraphClient` trait. A `GraphSession` wraps one
//! client, verifies it, and runs whole scripts statement by statement.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use ontograph::ontology::ObjectType;
//! use ontograph::SchemaCompiler;
//! use ontograph_client::{GraphSession, RecordingClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let script = SchemaCompiler::new().compile(&[ObjectType::new("Line")], &[]);
//!
//!     let session = GraphSession::connect(RecordingClient::new(), Duration::from_secs(5))
//!         .await.unwrap();
//!     let summary = session.run_script(&script.render()).await.unwrap();
//!     println!("Executed {} statements", summary.executed);
//!     session.disconnect().await.unwrap();
//! }
//! ```

pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod remote;
pub mod session;

pub use client::GraphClient;
pub use error::{ClientError, ClientResult};
pub use memory::RecordingClient;
pub use models::{QueryResult, RunSummary, ServerInfo};
pub use remote::Neo4jHttpClient;
pub use session::GraphSession;
