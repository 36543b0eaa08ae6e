//! Client configuration

use crate::error::{ClientError, Result};
use std::time::Duration;

/// Address of the server in the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Class every command operates on.
pub const DEFAULT_CLASS: &str = "Document";

/// Configuration shared by the transport and the command workflows.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL requests are resolved against, without trailing slash.
    pub base_url: String,
    /// Class used for schema creation, sample documents and bulk delete.
    pub class_name: String,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Maximum number of deletes in flight. 1 means strictly sequential.
    pub delete_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            class_name: DEFAULT_CLASS.to_string(),
            timeout: Duration::from_secs(30),
            delete_concurrency: 1,
        }
    }
}

impl ClientConfig {
    /// Check the configuration before any request is made.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ClientError::InvalidConfig {
            reason: format!("base URL '{}': {}", self.base_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig {
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.class_name.is_empty()
            || !self
                .class_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ClientError::InvalidConfig {
                reason: format!("class name '{}' is not a GraphQL name", self.class_name),
            });
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        if self.delete_concurrency == 0 {
            return Err(ClientError::InvalidConfig {
                reason: "delete concurrency must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
