//! Error types for the vector database client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error types that can occur while talking to the server
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, timeout, or any other failure below HTTP.
    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Query failed with status {status}: {body}")]
    QueryFailed { status: u16, body: String },

    /// The query response does not have the shape the client expects.
    #[error("Malformed response at `{path}`: {reason}")]
    MalformedResponse { path: String, reason: String },

    /// GraphQL reported errors alongside (or instead of) data.
    #[error("GraphQL errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("{status} delete failed: {body}")]
    DeleteFailed { status: u16, body: String },

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        ClientError::Transport { reason }
    }
}
