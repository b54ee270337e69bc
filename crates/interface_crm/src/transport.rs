//! Transport adapters
//!
//! [`ReqwestTransport`] is the production implementation of the
//! [`Transport`] port. It executes exactly one attempt per request, never
//! follows redirects (the retrieval pass-through needs to observe the
//! `Location` header), and maps HTTP outcomes onto the port's error
//! classes. [`mock::MockTransport`] replays canned outcomes for tests.

use async_trait::async_trait;
use std::time::Duration;

use core_kernel::{
    HttpMethod, HttpRequest, HttpResponse, MultipartPart, PortError, RequestBody, Transport,
};

use crate::config::CrmConfig;

/// Production transport adapter over a pooled reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Builds a client with the configured per-request timeout
    pub fn new(config: &CrmConfig) -> Result<Self, PortError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|error| PortError::transport(config.api_base_url.as_str(), error.to_string()))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PortError> {
        let url = request.url.clone();
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(parts) => builder.multipart(build_form(&url, parts).await?),
        };

        let response = builder.send().await.map_err(|error| {
            if error.is_timeout() {
                PortError::Timeout {
                    url: url.clone(),
                    duration_ms: self.timeout.as_millis() as u64,
                }
            } else {
                PortError::transport(url.as_str(), error.to_string())
            }
        })?;

        let status = response.status();
        if status.is_client_error() {
            return Err(PortError::client(
                url.as_str(),
                status.as_u16(),
                status.canonical_reason().unwrap_or("Empty response returned"),
            ));
        }
        if status.is_server_error() {
            return Err(PortError::server(
                url.as_str(),
                status.as_u16(),
                status.canonical_reason().unwrap_or("Empty response returned"),
            ));
        }

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|error| PortError::transport(url.as_str(), error.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Reads each part's source file and assembles the multipart form. Handles
/// are dropped as soon as the part body is built.
async fn build_form(
    url: &str,
    parts: Vec<MultipartPart>,
) -> Result<reqwest::multipart::Form, PortError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        let bytes = tokio::fs::read(&part.source_path).await.map_err(|error| {
            PortError::transport(
                url,
                format!("reading '{}': {error}", part.source_path.display()),
            )
        })?;
        let file_name = part
            .source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let piece = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&part.content_type)
            .map_err(|error| {
                PortError::transport(
                    url,
                    format!("invalid content type '{}': {error}", part.content_type),
                )
            })?;
        form = form.part(part.name, piece);
    }
    Ok(form)
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Replaying transport double for tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Pops one queued outcome per executed request and records the request
    /// history for later assertions.
    #[derive(Default)]
    pub struct MockTransport {
        outcomes: Mutex<VecDeque<Result<HttpResponse, PortError>>>,
        history: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a JSON response with the given status
        pub fn push_json(&self, status: u16, body: serde_json::Value) {
            self.outcomes.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: body.to_string().into_bytes(),
            }));
        }

        /// Queues an arbitrary response
        pub fn push_response(&self, response: HttpResponse) {
            self.outcomes.lock().unwrap().push_back(Ok(response));
        }

        /// Queues a failure outcome
        pub fn push_error(&self, error: PortError) {
            self.outcomes.lock().unwrap().push_back(Err(error));
        }

        /// Returns every request executed so far, in order
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.history.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PortError> {
            self.history.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(PortError::transport(request.url, "no mock response queued"))
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    #[test]
    fn test_reqwest_transport_builds_from_config() {
        assert!(ReqwestTransport::new(&CrmConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records_history() {
        let transport = MockTransport::new();
        transport.push_json(200, serde_json::json!({"first": true}));
        transport.push_error(PortError::client("https://example.com", 404, "Not Found"));

        let first = transport
            .execute(HttpRequest::new(HttpMethod::Get, "https://example.com/a"))
            .await
            .unwrap();
        assert_eq!(first.status, 200);

        let second = transport
            .execute(HttpRequest::new(HttpMethod::Get, "https://example.com/b"))
            .await
            .unwrap_err();
        assert_eq!(second.status(), Some(404));

        let history = transport.requests();
        assert_eq!(history.len(), 2);
        assert!(history[0].url.ends_with("/a"));
        assert!(history[1].url.ends_with("/b"));
    }

    #[tokio::test]
    async fn test_mock_with_empty_queue_reports_transport_failure() {
        let transport = MockTransport::new();
        let error = transport
            .execute(HttpRequest::new(HttpMethod::Get, "https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(error, PortError::Transport { .. }));
    }
}
