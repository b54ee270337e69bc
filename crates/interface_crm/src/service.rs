//! Submission orchestrator
//!
//! [`CaseService`] holds one bearer token and drives the two-phase
//! submission: upload every supporting file in one positional multipart
//! request, write the assigned storage paths back onto the records, then
//! post the assembled case document. The phases are strictly sequential —
//! the case payload depends on the upload results — and nothing is retried
//! or rolled back: a failure after the upload leaves the uploaded files in
//! place.
//!
//! The service is safe to reuse for sequential submissions; concurrent
//! submissions should use distinct instances.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use core_kernel::{CaseId, HttpMethod, HttpRequest, MultipartPart, Transport};
use domain_application::{Applicant, Company, File, Loan};

use crate::auth::{self, Credentials};
use crate::config::CrmConfig;
use crate::error::CrmError;
use crate::payload::{CasePayload, CompanyPayload, EntityPayload, LoanPayload, PersonPayload};

#[derive(Debug, Deserialize)]
struct CaseResponse {
    #[serde(rename = "CasePK")]
    case_pk: Option<i64>,
}

/// Client for submitting loan applications to the case-management system
pub struct CaseService {
    config: CrmConfig,
    transport: Arc<dyn Transport>,
    token: String,
}

impl std::fmt::Debug for CaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseService")
            .field("config", &self.config)
            .field("transport", &"<dyn Transport>")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl CaseService {
    /// Creates a service around an existing bearer token
    pub fn from_token(
        config: CrmConfig,
        transport: Arc<dyn Transport>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            config,
            transport,
            token: token.into(),
        }
    }

    /// Creates a service by exchanging client credentials for a token
    pub async fn from_credentials(
        config: CrmConfig,
        transport: Arc<dyn Transport>,
        credentials: Credentials,
    ) -> Result<Self, CrmError> {
        let token = auth::request_token(&config, transport.as_ref(), &credentials).await?;
        Ok(Self {
            config,
            transport,
            token,
        })
    }

    /// Returns the bearer token in use
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Submits an application: the primary company, the loan facility, and
    /// the applicants standing behind it.
    ///
    /// On success every uploaded [`File`] carries its server-assigned
    /// storage path and the new case identifier is returned. On failure the
    /// submission aborts where it stands; files uploaded before the failure
    /// remain uploaded.
    #[tracing::instrument(skip_all)]
    pub async fn submit_application(
        &self,
        primary: &mut Company,
        loan: &mut Loan,
        applicants: &mut [Applicant],
    ) -> Result<CaseId, CrmError> {
        let parts = collect_parts(primary, loan, applicants);
        info!(files = parts.len(), applicants = applicants.len(), "submitting application");

        if !parts.is_empty() {
            let assigned = self.upload(parts).await?;
            assign_upload_paths(primary, loan, applicants, &assigned);
        }

        let primary_contact_name = derive_primary_contact(applicants)?;
        let payload = build_case_payload(primary, loan, applicants, primary_contact_name)?;

        let url = self.config.endpoint("case");
        let request = HttpRequest::new(HttpMethod::Post, url.as_str())
            .header("Authorization", self.token.as_str())
            .json(serde_json::to_value(&payload)?);
        let response = self.transport.execute(request).await?;

        let decoded: CaseResponse = response.json().map_err(|error| CrmError::Decode {
            url,
            message: error.to_string(),
        })?;
        let case_id = CaseId::new(decoded.case_pk.ok_or(CrmError::MissingCasePk)?);

        info!(%case_id, "case created");
        Ok(case_id)
    }

    /// Uploads all collected parts in one multipart request and returns the
    /// position-to-storage-path mapping, after verifying the key sets match.
    async fn upload(&self, parts: Vec<MultipartPart>) -> Result<HashMap<String, String>, CrmError> {
        let expected: Vec<String> = (0..parts.len()).map(|index| index.to_string()).collect();
        let url = self.config.endpoint("upload");
        debug!(count = parts.len(), "uploading supporting documents");

        let request = HttpRequest::new(HttpMethod::Post, url.as_str())
            .header("Authorization", self.token.as_str())
            .multipart(parts);
        let response = self.transport.execute(request).await?;

        let assigned: HashMap<String, String> =
            response.json().map_err(|error| CrmError::Decode {
                url,
                message: error.to_string(),
            })?;

        let missing: Vec<String> = expected
            .iter()
            .filter(|key| !assigned.contains_key(*key))
            .cloned()
            .collect();
        let mut unexpected: Vec<String> = assigned
            .keys()
            .filter(|key| !expected.contains(key))
            .cloned()
            .collect();
        unexpected.sort();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(CrmError::UploadCorrelation { missing, unexpected });
        }
        Ok(assigned)
    }

    /// Resolves an uploaded file's storage path to its presigned retrieval
    /// URL, as reported by the redirect the remote answers with.
    pub async fn retrieve_file_url(&self, storage_path: &str) -> Result<String, CrmError> {
        let url = self.config.endpoint("upload");
        let request = HttpRequest::new(HttpMethod::Get, url.as_str())
            .query("File", storage_path)
            .header("Authorization", self.token.as_str());
        let response = self.transport.execute(request).await?;

        response
            .header("Location")
            .map(str::to_string)
            .ok_or_else(|| CrmError::Decode {
                url,
                message: "expected a redirect with a Location header".to_string(),
            })
    }
}

/// Fixed traversal order shared by the upload request and the write-back:
/// primary company files, loan files, each person's files in applicant
/// order, each company's files in applicant order.
fn collect_files<'a>(
    primary: &'a Company,
    loan: &'a Loan,
    applicants: &'a [Applicant],
) -> Vec<&'a File> {
    let mut files: Vec<&File> = Vec::new();
    files.extend(primary.files());
    files.extend(loan.files());
    for applicant in applicants {
        if let Applicant::Person(person) = applicant {
            files.extend(person.files());
        }
    }
    for applicant in applicants {
        if let Applicant::Company(company) = applicant {
            files.extend(company.files());
        }
    }
    files
}

fn collect_parts(primary: &Company, loan: &Loan, applicants: &[Applicant]) -> Vec<MultipartPart> {
    collect_files(primary, loan, applicants)
        .into_iter()
        .enumerate()
        .map(|(index, file)| MultipartPart {
            name: index.to_string(),
            source_path: file.name_and_path().to_path_buf(),
            content_type: file.mime_type().to_string(),
        })
        .collect()
}

/// Walks the same traversal order as [`collect_files`], writing each file's
/// assigned storage path back onto it.
fn assign_upload_paths(
    primary: &mut Company,
    loan: &mut Loan,
    applicants: &mut [Applicant],
    assigned: &HashMap<String, String>,
) {
    let mut index = 0usize;
    let mut write_back = |file: &mut File| {
        if let Some(path) = assigned.get(&index.to_string()) {
            file.set_upload_path(path);
        }
        index += 1;
    };

    for file in primary.files_mut() {
        write_back(file);
    }
    for file in loan.files_mut() {
        write_back(file);
    }
    for applicant in applicants.iter_mut() {
        if let Applicant::Person(person) = applicant {
            for file in person.files_mut() {
                write_back(file);
            }
        }
    }
    for applicant in applicants.iter_mut() {
        if let Applicant::Company(company) = applicant {
            for file in company.files_mut() {
                write_back(file);
            }
        }
    }
}

/// "{forename} {surname}" of the person flagged primary contact. Errors only
/// when persons exist and none is flagged; a person-free applicant list
/// yields an empty name.
fn derive_primary_contact(applicants: &[Applicant]) -> Result<String, CrmError> {
    let mut persons = applicants.iter().filter_map(Applicant::as_person).peekable();
    if persons.peek().is_none() {
        return Ok(String::new());
    }
    persons
        .find(|person| person.is_primary_contact())
        .map(|person| person.full_name())
        .ok_or(CrmError::MissingPrimaryContact)
}

/// Serializes the case document: persons first, then companies, each tagged
/// with its entity type; the primary company untagged.
fn build_case_payload(
    primary: &Company,
    loan: &Loan,
    applicants: &[Applicant],
    primary_contact_name: String,
) -> Result<CasePayload, CrmError> {
    let mut entities = Vec::with_capacity(applicants.len());
    for applicant in applicants {
        if let Applicant::Person(person) = applicant {
            entities.push(EntityPayload::Person(PersonPayload::from_person(person)?));
        }
    }
    for applicant in applicants {
        if let Applicant::Company(company) = applicant {
            entities.push(EntityPayload::Company(CompanyPayload::from_company(
                company, true,
            )?));
        }
    }

    Ok(CasePayload {
        primary: CompanyPayload::from_company(primary, false)?,
        loan: LoanPayload::from_loan(loan)?,
        entities,
        primary_contact_name,
    })
}
