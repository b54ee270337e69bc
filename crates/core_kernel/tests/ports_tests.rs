//! Tests for the transport port contract

use async_trait::async_trait;
use core_kernel::{HttpMethod, HttpRequest, HttpResponse, PortError, Transport};

/// A transport that classifies by a canned status code
struct StatusTransport {
    status: u16,
}

#[async_trait]
impl Transport for StatusTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, PortError> {
        match self.status {
            400..=499 => Err(PortError::client(request.url, self.status, "rejected")),
            500..=599 => Err(PortError::server(request.url, self.status, "failed")),
            _ => Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: b"{}".to_vec(),
            }),
        }
    }
}

#[tokio::test]
async fn transport_object_is_usable_through_dyn() {
    let transport: Box<dyn Transport> = Box::new(StatusTransport { status: 200 });
    let response = transport
        .execute(HttpRequest::new(HttpMethod::Get, "https://example.com"))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn client_and_server_outcomes_are_distinguishable() {
    let client_side = StatusTransport { status: 422 };
    let err = client_side
        .execute(HttpRequest::new(HttpMethod::Post, "https://example.com"))
        .await
        .unwrap_err();
    assert!(err.is_client());
    assert_eq!(err.status(), Some(422));

    let server_side = StatusTransport { status: 503 };
    let err = server_side
        .execute(HttpRequest::new(HttpMethod::Post, "https://example.com"))
        .await
        .unwrap_err();
    assert!(err.is_server());
    assert_eq!(err.status(), Some(503));
}
