//! Transport port
//!
//! The submission client never talks to the network directly. Everything it
//! needs from HTTP is captured by the [`Transport`] trait: execute one
//! request, report the outcome in one of a small set of distinguishable
//! classes. Adapters implement the trait; the orchestration logic receives it
//! by injection.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Submission Orchestrator           │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │              Transport (port)                │
//! └─────────────────────────────────────────────┘
//!            ▲                      ▲
//!            │                      │
//!   ┌───────┴────────┐    ┌────────┴───────┐
//!   │ ReqwestTransport│    │  MockTransport │
//!   │  (production)   │    │    (tests)     │
//!   └────────────────┘    └────────────────┘
//! ```
//!
//! Outcome classes: 4xx responses surface as [`PortError::Client`], 5xx as
//! [`PortError::Server`], connection-level failures as
//! [`PortError::Transport`] or [`PortError::Timeout`]. Every class carries
//! what is known of the upstream status so callers can decide whether a
//! retry with different input makes sense. The port itself never retries.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error classes a transport adapter may report
#[derive(Debug, Error)]
pub enum PortError {
    /// The remote rejected the request (4xx)
    #[error("client error returned from {url} ({status}: {reason})")]
    Client {
        url: String,
        status: u16,
        reason: String,
    },

    /// The remote failed to process the request (5xx)
    #[error("server error returned from {url} ({status}: {reason})")]
    Server {
        url: String,
        status: u16,
        reason: String,
    },

    /// The request did not complete within the configured deadline
    #[error("request to {url} timed out after {duration_ms}ms")]
    Timeout { url: String, duration_ms: u64 },

    /// The request could not be executed at all (DNS, connect, TLS, I/O)
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },
}

impl PortError {
    /// Creates a Client error
    pub fn client(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        PortError::Client {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Creates a Server error
    pub fn server(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        PortError::Server {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns the upstream HTTP status, where one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            PortError::Client { status, .. } | PortError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the remote classified the request itself as bad (4xx)
    pub fn is_client(&self) -> bool {
        matches!(self, PortError::Client { .. })
    }

    /// Returns true if the remote failed while processing the request (5xx)
    pub fn is_server(&self) -> bool {
        matches!(self, PortError::Server { .. })
    }
}

/// HTTP method subset the client uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One part of a multipart/form-data body.
///
/// The part references a file on disk; the adapter opens it when the request
/// body is built and releases the handle once the request completes or fails.
#[derive(Debug, Clone)]
pub struct MultipartPart {
    /// Form field name for this part
    pub name: String,
    /// Local file whose contents form the part body
    pub source_path: PathBuf,
    /// Declared content type of the part
    pub content_type: String,
}

/// Request body encodings the client relies on
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    /// JSON body, sent with `Content-Type: application/json`
    Json(serde_json::Value),
    /// Plain form-encoded fallback
    Form(Vec<(String, String)>),
    /// Multipart form body keyed by field name
    Multipart(Vec<MultipartPart>),
}

/// An HTTP request to be executed by a transport adapter
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a request with no query, headers, or body
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Appends a query parameter (encoded by the adapter)
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Sets a multipart form body
    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Sets a form-encoded body
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }
}

/// An HTTP response as reported by a transport adapter.
///
/// Only successful (non-4xx/5xx) responses are represented; error statuses
/// surface as [`PortError`] values instead.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns the first header with the given name, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request-executor capability the submission client requires.
///
/// Implementations execute exactly one attempt per call. Timeout policy is
/// the adapter's concern; the orchestration logic only reacts to the outcome
/// classes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and reports the outcome
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_classes() {
        let client = PortError::client("https://example.com", 404, "Not Found");
        assert!(client.is_client());
        assert!(!client.is_server());
        assert_eq!(client.status(), Some(404));
        assert!(client.to_string().contains("404"));

        let server = PortError::server("https://example.com", 502, "Bad Gateway");
        assert!(server.is_server());
        assert_eq!(server.status(), Some(502));

        let transport = PortError::transport("https://example.com", "connection refused");
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let response = HttpResponse {
            status: 302,
            headers: vec![("Location".to_string(), "https://cdn.example.com/f".to_string())],
            body: Vec::new(),
        };
        assert_eq!(response.header("location"), Some("https://cdn.example.com/f"));
        assert_eq!(response.header("LOCATION"), Some("https://cdn.example.com/f"));
        assert_eq!(response.header("X-Missing"), None);
    }

    #[test]
    fn test_response_json_decoding() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: br#"{"access_token":"abc"}"#.to_vec(),
        };

        #[derive(serde::Deserialize)]
        struct Token {
            access_token: String,
        }

        let token: Token = response.json().unwrap();
        assert_eq!(token.access_token, "abc");

        let bad: Result<Token, _> = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"not json".to_vec(),
        }
        .json();
        assert!(bad.is_err());
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/case")
            .header("Authorization", "token")
            .json(serde_json::json!({"a": 1}));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.len(), 1);
        assert!(matches!(request.body, RequestBody::Json(_)));
    }
}
