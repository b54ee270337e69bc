//! Submits a minimal application against a configured CRM environment.
//!
//! Expects `CRM_API_BASE_URL`, `CRM_AUTH_ENDPOINT`, `CRM_TIMEOUT_SECS`,
//! `CRM_CLIENT_ID`, and `CRM_CLIENT_SECRET` in the environment.

use std::sync::Arc;

use domain_application::{Applicant, Company, CompanyDraft, Loan, Person, PersonDraft};
use interface_crm::{CaseService, Credentials, CrmConfig, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CrmConfig::from_env()?;
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    let credentials = Credentials {
        client_id: std::env::var("CRM_CLIENT_ID")?,
        client_secret: std::env::var("CRM_CLIENT_SECRET")?,
    };
    let service = CaseService::from_credentials(config, transport, credentials).await?;

    let mut primary = Company::create(CompanyDraft {
        name: "Demo Trading Ltd".to_string(),
        crn: "12345678".to_string(),
        ..Default::default()
    })?;
    let mut loan = Loan::new(100_000, "demo submission", Vec::new())?;
    let mut applicants = vec![Applicant::from(Person::create(PersonDraft {
        forename: "Demo".to_string(),
        surname: "Applicant".to_string(),
        is_primary_contact: true,
        ..Default::default()
    })?)];

    let case_id = service
        .submit_application(&mut primary, &mut loan, &mut applicants)
        .await?;
    println!("created {case_id}");
    Ok(())
}
