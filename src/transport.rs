//! HTTP transport: one request in, status and body out.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// HTTP methods the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the server base URL.
///
/// The path is kept as raw segments so identifiers are encoded exactly once,
/// by the transport that builds the final URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Get, segments)
    }

    pub fn post<I, S>(segments: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            body: Some(body),
            ..Self::new(Method::Post, segments)
        }
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Delete, segments)
    }

    /// Unencoded path, e.g. `/v1/objects/abc`. Used for logging and matching.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Status code and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry an [`ApiRequest`] to the server.
///
/// Implementations must be safe to share between concurrent requests; the
/// bulk deleter borrows one transport for all of its in-flight deletes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request. Only failures below HTTP are errors; any status
    /// code, including 4xx/5xx, comes back as an `ApiResponse`.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidConfig {
            reason: format!("base URL '{}': {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig {
                reason: format!("base URL '{}' cannot have a path", config.base_url),
            });
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the request path against the base URL, percent-encoding each segment.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig {
                reason: format!("base URL '{}' cannot have a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}

/// Scripted transport for unit tests.
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Reply {
        Response(ApiResponse),
        Failure(String),
    }

    /// Answers from a fixed route table and records every request it sees.
    /// Unknown routes answer 404.
    #[derive(Default)]
    pub struct StubTransport {
        routes: HashMap<(Method, String), Reply>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
            self.routes.insert(
                (method, path.to_string()),
                Reply::Response(ApiResponse::new(status, body)),
            );
            self
        }

        pub fn fail(mut self, method: Method, path: &str, reason: &str) -> Self {
            self.routes
                .insert((method, path.to_string()), Reply::Failure(reason.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, method: Method) -> usize {
            self.requests()
                .iter()
                .filter(|r| r.method == method)
                .count()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
            let key = (request.method, request.path());
            self.requests.lock().unwrap().push(request);
            match self.routes.get(&key) {
                Some(Reply::Response(response)) => Ok(response.clone()),
                Some(Reply::Failure(reason)) => Err(ClientError::Transport {
                    reason: reason.clone(),
                }),
                None => Ok(ApiResponse::new(404, "no route")),
            }
        }
    }
}
