//! # vectordb-client
//!
//! A console client for a Weaviate-compatible vector database.
//!
//! This library provides:
//! - A `Transport` trait and a `reqwest`-backed HTTP implementation
//! - The GraphQL identifier query and a strict response extractor
//! - Bulk deletion with per-object failure accounting
//! - Single-key commands for schema creation, sample inserts and listing
//! - A session loop over pluggable command sources
//!
//! ## Example
//!
//! ```no_run
//! use vectordb_client::{delete_class_objects, ClientConfig, HttpTransport};
//!
//! # async fn run() -> vectordb_client::Result<()> {
//! let config = ClientConfig::default();
//! let transport = HttpTransport::new(&config)?;
//!
//! let report = delete_class_objects(&transport, "Document", 1).await?;
//! println!("deleted {} of {}", report.deleted, report.total_found);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod delete;
pub mod error;
pub mod extract;
pub mod query;
pub mod session;
pub mod source;
pub mod templates;
pub mod transport;

pub use commands::{dispatch, Command, Outcome};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CLASS};
pub use delete::{delete_all, delete_class_objects, DeletionFailure, DeletionReport};
pub use error::{ClientError, Result};
pub use extract::extract_ids;
pub use query::fetch_ids;
pub use session::{Session, SessionStats};
pub use source::{CommandSource, LineSource, ScriptedSource};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
