//! Token acquisition
//!
//! The client either receives a ready-made bearer token or performs one
//! OAuth client-credentials exchange against the configured auth endpoint.
//! The token is stored verbatim and sent verbatim: the remote expects the
//! `Authorization` header without a scheme prefix. That is unusual (a
//! `Bearer ` prefix would be conventional) and is preserved as observed;
//! see DESIGN.md before changing it.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use core_kernel::{HttpMethod, HttpRequest, PortError, Transport};

use crate::config::CrmConfig;
use crate::error::CrmError;

/// OAuth client credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges client credentials for an access token.
///
/// Any non-2xx outcome and any undecodable body fail with
/// [`CrmError::Auth`] carrying the upstream status.
pub(crate) async fn request_token(
    config: &CrmConfig,
    transport: &dyn Transport,
    credentials: &Credentials,
) -> Result<String, CrmError> {
    debug!(endpoint = %config.auth_endpoint, "requesting access token");

    let request = HttpRequest::new(HttpMethod::Post, config.auth_endpoint.as_str())
        .header("Content-Type", "application/json")
        .json(json!({
            "grant_type": "client_credentials",
            "client_id": credentials.client_id,
            "client_secret": credentials.client_secret,
            "audience": config.api_base_url,
        }));

    let response = match transport.execute(request).await {
        Ok(response) => response,
        Err(PortError::Client { status, reason, .. })
        | Err(PortError::Server { status, reason, .. }) => {
            return Err(CrmError::Auth {
                status,
                message: reason,
            })
        }
        Err(other) => return Err(CrmError::Port(other)),
    };

    let token: TokenResponse = response.json().map_err(|_| CrmError::Auth {
        status: response.status,
        message: "unable to decode token response".to_string(),
    })?;

    Ok(token.access_token)
}
