//! Client errors
//!
//! Orchestration invariant violations (`MissingPrimaryContact`,
//! `UploadCorrelation`, `MissingCasePk`) abort the in-flight submission;
//! nothing already uploaded is rolled back. Network failures pass through
//! from the transport layer with their status codes intact.

use thiserror::Error;

use core_kernel::PortError;
use domain_application::ValidationError;

/// Errors raised while authenticating or submitting an application
#[derive(Debug, Error)]
pub enum CrmError {
    /// The token exchange was rejected or returned an unusable body
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Applicant persons were supplied but none is flagged primary contact
    #[error("no applicant person is flagged as the primary contact")]
    MissingPrimaryContact,

    /// The upload response keys do not match the uploaded file positions.
    /// Fatal: a silent mismatch would attribute documents to the wrong
    /// party.
    #[error("upload response keys do not match the uploaded files (missing {missing:?}, unexpected {unexpected:?})")]
    UploadCorrelation {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// The case-create response carried no `CasePK`
    #[error("case response did not contain a CasePK")]
    MissingCasePk,

    /// A response body could not be decoded against its contract
    #[error("unable to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A domain record failed validation during serialization
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A network-layer failure, status preserved where one was received
    #[error(transparent)]
    Port(#[from] PortError),

    /// Payload serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrmError {
    /// Returns the upstream HTTP status, where one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            CrmError::Auth { status, .. } => Some(*status),
            CrmError::Port(port) => port.status(),
            _ => None,
        }
    }
}
