//! HTTP transport abstraction
//!
//! The dispatcher talks to the network through the [`Transport`] trait so
//! request construction, signing and response handling can be unit tested
//! without real network calls.
//!
//! # Example
//!
//! ```no_run
//! use coinspot_rest::transport::{HttpRequest, ReqwestTransport, Transport, TransportError};
//! use std::time::Duration;
//!
//! async fn example() -> Result<(), TransportError> {
//!     let transport = ReqwestTransport::new(Duration::from_secs(30), "coinspot-rest")?;
//!     let response = transport
//!         .send(HttpRequest::get("https://www.coinspot.com.au/pubapi/v2/latest"))
//!         .await?;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors (no HTTP response was obtained)
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client could not be built
    #[error("client build failed: {0}")]
    Build(String),

    /// The request could not be completed
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// HTTP verb used by the CoinSpot API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Public endpoints
    Get,
    /// Private endpoints
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A fully built outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Header name/value pairs, in insertion order
    pub headers: Vec<(String, String)>,
    /// Raw body, sent byte-for-byte
    pub body: Option<String>,
}

impl HttpRequest {
    /// Create a GET request with no headers or body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a POST request carrying `body`
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status
    pub status: u16,
    /// Body text
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations only move bytes: any response that arrives, whatever its
/// status, is returned as `Ok`. Status and body interpretation belong to the
/// dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, len = body.len(), "Received response");

        Ok(HttpResponse { status, body })
    }
}

/// Mock transport for testing
///
/// Returns queued responses in order and records every request it receives.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a 200 response
    pub fn push_ok(&self, body: impl Into<String>) {
        self.push_response(200, body);
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no mock response queued".into())))
    }
}
