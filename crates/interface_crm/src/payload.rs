//! Case payload serialization
//!
//! The DTOs here reproduce the remote system's case document field for
//! field. Building a file payload re-asserts that the file's category is
//! legal for the entity holding it, so the aggregate invariant checked at
//! construction also holds at the moment of serialization.

use serde::Serialize;

use domain_application::{validation, Company, EntityKind, File, Loan, Person, ValidationError};

use crate::error::CrmError;

/// One supporting document as referenced by the case payload
#[derive(Debug, Serialize)]
pub struct FilePayload {
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "GeneratedFileName")]
    pub generated_file_name: Option<String>,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "CategoryID")]
    pub category_id: u32,
    #[serde(rename = "MimeType")]
    pub mime_type: String,
}

impl FilePayload {
    fn from_file(file: &File, kind: EntityKind) -> Result<Self, ValidationError> {
        if !file.category().allows(kind) {
            return Err(ValidationError::CategoryNotAllowed {
                category: file.category().label.clone(),
                file: file.name_and_path().display().to_string(),
                kind,
            });
        }
        Ok(Self {
            file_name: file.file_name(),
            generated_file_name: file.upload_path().map(str::to_string),
            description: file.description().to_string(),
            category_id: file.category().id,
            mime_type: file.mime_type().to_string(),
        })
    }
}

/// A company as embedded in the case payload.
///
/// `Type` is present only when the company appears as an applicant entity;
/// the primary company is untagged.
#[derive(Debug, Serialize)]
pub struct CompanyPayload {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<&'static str>,
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    #[serde(rename = "LegalStatus")]
    pub legal_status: u8,
    #[serde(rename = "TradingAddressLine1")]
    pub trading_address_line_1: String,
    #[serde(rename = "TradingAddressLine2")]
    pub trading_address_line_2: String,
    #[serde(rename = "TradingAddressLine3")]
    pub trading_address_line_3: String,
    #[serde(rename = "TradingAddressLine4")]
    pub trading_address_line_4: String,
    #[serde(rename = "TradingAddressPostcode")]
    pub trading_address_postcode: String,
    #[serde(rename = "RegisteredAddressLine1")]
    pub registered_address_line_1: String,
    #[serde(rename = "RegisteredAddressLine2")]
    pub registered_address_line_2: String,
    #[serde(rename = "RegisteredAddressLine3")]
    pub registered_address_line_3: String,
    #[serde(rename = "RegisteredAddressLine4")]
    pub registered_address_line_4: String,
    #[serde(rename = "RegisteredAddressPostcode")]
    pub registered_address_postcode: String,
    #[serde(rename = "Telephone")]
    pub telephone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "IncorporationDate")]
    pub incorporation_date: String,
    #[serde(rename = "CompanyRegistrationNo")]
    pub company_registration_no: String,
    #[serde(rename = "SicCodes")]
    pub sic_codes: String,
    #[serde(rename = "Position")]
    pub position: u8,
    #[serde(rename = "Files")]
    pub files: Vec<FilePayload>,
}

impl CompanyPayload {
    pub(crate) fn from_company(company: &Company, tagged: bool) -> Result<Self, CrmError> {
        let files = company
            .files()
            .iter()
            .map(|file| FilePayload::from_file(file, EntityKind::Company))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entity_type: tagged.then_some("Company"),
            company_name: company.name().to_string(),
            legal_status: company.legal_status().code(),
            trading_address_line_1: company.trading_address_line_1().to_string(),
            trading_address_line_2: company.trading_address_line_2().to_string(),
            trading_address_line_3: company.trading_address_line_3().to_string(),
            trading_address_line_4: company.trading_address_line_4().to_string(),
            trading_address_postcode: company.trading_address_postcode().to_string(),
            registered_address_line_1: company.registered_address_line_1().to_string(),
            registered_address_line_2: company.registered_address_line_2().to_string(),
            registered_address_line_3: company.registered_address_line_3().to_string(),
            registered_address_line_4: company.registered_address_line_4().to_string(),
            registered_address_postcode: company.registered_address_postcode().to_string(),
            telephone: company.telephone().to_string(),
            email: company.email().to_string(),
            website: company.website().to_string(),
            notes: company.notes().to_string(),
            incorporation_date: validation::format_date(company.incorporation_date()?),
            company_registration_no: company.registration_number().to_string(),
            sic_codes: company.sic_codes().to_string(),
            position: company.position(),
            files,
        })
    }
}

/// A person as embedded in the case payload's entity list
#[derive(Debug, Serialize)]
pub struct PersonPayload {
    #[serde(rename = "Type")]
    pub entity_type: &'static str,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Forename")]
    pub forename: String,
    #[serde(rename = "MiddleName")]
    pub middle_name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(rename = "AddressLine1")]
    pub address_line_1: String,
    #[serde(rename = "AddressLine2")]
    pub address_line_2: String,
    #[serde(rename = "AddressLine3")]
    pub address_line_3: String,
    #[serde(rename = "AddressLine4")]
    pub address_line_4: String,
    #[serde(rename = "AddressPostcode")]
    pub address_postcode: String,
    #[serde(rename = "DayPhone")]
    pub day_phone: String,
    #[serde(rename = "MobilePhone")]
    pub mobile_phone: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Position")]
    pub position: u8,
    #[serde(rename = "Gender")]
    pub gender: u8,
    #[serde(rename = "Files")]
    pub files: Vec<FilePayload>,
    #[serde(rename = "PassportForename")]
    pub passport_forename: String,
    #[serde(rename = "PassportMiddleName")]
    pub passport_middle_name: String,
    #[serde(rename = "PassportSurname")]
    pub passport_surname: String,
}

impl PersonPayload {
    pub(crate) fn from_person(person: &Person) -> Result<Self, CrmError> {
        let files = person
            .files()
            .iter()
            .map(|file| FilePayload::from_file(file, EntityKind::Person))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entity_type: "Person",
            title: person.title().map(|t| t.as_str().to_string()).unwrap_or_default(),
            forename: person.forename().to_string(),
            middle_name: person.middle_name().to_string(),
            surname: person.surname().to_string(),
            date_of_birth: validation::format_date(person.date_of_birth()?),
            address_line_1: person.address_line_1().to_string(),
            address_line_2: person.address_line_2().to_string(),
            address_line_3: person.address_line_3().to_string(),
            address_line_4: person.address_line_4().to_string(),
            address_postcode: person.address_postcode().to_string(),
            day_phone: person.day_phone().to_string(),
            mobile_phone: person.mobile_phone().to_string(),
            email: person.email().to_string(),
            notes: person.notes().to_string(),
            position: person.position(),
            gender: person.gender().code(),
            files,
            passport_forename: person.passport_forename().to_string(),
            passport_middle_name: person.passport_middle_name().to_string(),
            passport_surname: person.passport_surname().to_string(),
        })
    }
}

/// The loan facility section of the case payload
#[derive(Debug, Serialize)]
pub struct LoanPayload {
    #[serde(rename = "FacilityAmountRequested")]
    pub facility_amount_requested: u64,
    #[serde(rename = "FacilityUse")]
    pub facility_use: String,
    #[serde(rename = "Files")]
    pub files: Vec<FilePayload>,
}

impl LoanPayload {
    pub(crate) fn from_loan(loan: &Loan) -> Result<Self, CrmError> {
        let files = loan
            .files()
            .iter()
            .map(|file| FilePayload::from_file(file, EntityKind::Loan))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            facility_amount_requested: loan.amount(),
            facility_use: loan.use_of_funds().to_string(),
            files,
        })
    }
}

/// An applicant entity: a tagged person or company payload
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EntityPayload {
    Person(PersonPayload),
    Company(CompanyPayload),
}

/// The full case document posted to the case-create endpoint
#[derive(Debug, Serialize)]
pub struct CasePayload {
    #[serde(rename = "Primary")]
    pub primary: CompanyPayload,
    #[serde(rename = "Loan")]
    pub loan: LoanPayload,
    #[serde(rename = "Entities")]
    pub entities: Vec<EntityPayload>,
    #[serde(rename = "PrimaryContactName")]
    pub primary_contact_name: String,
}
