//! Loan Application Domain
//!
//! This crate holds the validated records a loan application is built from:
//! the primary company, the loan facility, the applicant people and
//! companies, and the supporting documents attached to each of them.
//!
//! Every record is constructed through a fail-fast factory: the first
//! violated field rule is returned as a [`ValidationError`] before the value
//! exists at all, so a record in hand is always a valid one. The only
//! post-construction mutations are appending a supporting file (which
//! re-runs the category check) and the orchestrator writing back a file's
//! server-assigned storage path after upload.
//!
//! Document categories are data, not code: the [`CategoryTable`] is loaded
//! from JSON (a builtin table ships embedded) and tags each category with
//! the entity kinds allowed to hold it.
//!
//! # Examples
//!
//! ```rust
//! use domain_application::{Company, CompanyDraft, LegalStatus};
//! use chrono::NaiveDate;
//!
//! let company = Company::create(CompanyDraft {
//!     name: "Hill & Sons Ltd".to_string(),
//!     crn: "12345678".to_string(),
//!     incorporation_date: NaiveDate::from_ymd_opt(2010, 1, 1)
//!         .unwrap()
//!         .and_hms_opt(0, 0, 0)
//!         .unwrap(),
//!     legal_status: Some(LegalStatus::LimitedCompany),
//!     registered_address_postcode: Some("EC1A 1BB".to_string()),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(company.registration_number(), "12345678");
//! ```

pub mod applicant;
pub mod category;
pub mod company;
pub mod error;
pub mod file;
pub mod loan;
pub mod person;
pub mod validation;

pub use applicant::Applicant;
pub use category::{Category, CategoryTable, EntityKind, TaxonomyError};
pub use company::{Company, CompanyDraft, LegalStatus};
pub use error::ValidationError;
pub use file::File;
pub use loan::Loan;
pub use person::{Gender, Person, PersonDraft, Title};
pub use validation::position;
