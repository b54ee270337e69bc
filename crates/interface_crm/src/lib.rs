//! Case-Management CRM Client
//!
//! This crate orchestrates the submission of a loan application to the
//! remote case-management system. The workflow is two-phase and strictly
//! sequential:
//!
//! 1. **Upload** — every supporting file reachable from the primary company,
//!    the loan, and the applicant list is collected in a fixed traversal
//!    order and sent in one multipart request keyed by position. The
//!    response maps the same positions to server-assigned storage paths,
//!    which are written back onto the originating file records. A key-set
//!    mismatch is fatal: silently continuing would attribute documents to
//!    the wrong party.
//! 2. **Case create** — the full case document (primary company, loan,
//!    applicant entities, primary contact name) is posted and the new case
//!    identifier returned.
//!
//! The HTTP layer is a port ([`core_kernel::Transport`]); construction takes
//! the adapter and a [`CrmConfig`] explicitly, so there is no process-wide
//! state. [`ReqwestTransport`] is the production adapter and
//! `MockTransport` (behind the `mock` feature) the test double.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use interface_crm::{CaseService, CrmConfig, ReqwestTransport};
//! use domain_application::{Applicant, Company, CompanyDraft, Loan};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CrmConfig::default();
//! let transport = Arc::new(ReqwestTransport::new(&config)?);
//! let service = CaseService::from_token(config, transport, "a-jwt");
//!
//! let mut primary = Company::create(CompanyDraft {
//!     name: "Hill & Sons Ltd".to_string(),
//!     crn: "12345678".to_string(),
//!     ..Default::default()
//! })?;
//! let mut loan = Loan::new(250_000, "refit of trading premises", Vec::new())?;
//! let mut applicants: Vec<Applicant> = Vec::new();
//!
//! let case_id = service
//!     .submit_application(&mut primary, &mut loan, &mut applicants)
//!     .await?;
//! println!("created {case_id}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod payload;
pub mod service;
pub mod transport;

pub use auth::Credentials;
pub use config::CrmConfig;
pub use error::CrmError;
pub use service::CaseService;
pub use transport::ReqwestTransport;
#[cfg(any(test, feature = "mock"))]
pub use transport::mock::MockTransport;
