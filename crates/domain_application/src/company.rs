//! Company record
//!
//! Used both for the primary company an application is made on behalf of and
//! for applicant companies standing behind it (guarantors, PSC holding
//! companies, and so on).

use chrono::NaiveDateTime;

use crate::category::EntityKind;
use crate::error::ValidationError;
use crate::file::File;
use crate::validation;

/// Legal form of a company as the remote system encodes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalStatus {
    SoleTrader,
    LimitedLiabilityPartnership,
    OrdinaryPartnership,
    LimitedCompany,
    PublicLimitedCompany,
    Charity,
}

impl LegalStatus {
    /// Wire encoding (0 through 5)
    pub fn code(&self) -> u8 {
        match self {
            LegalStatus::SoleTrader => 0,
            LegalStatus::LimitedLiabilityPartnership => 1,
            LegalStatus::OrdinaryPartnership => 2,
            LegalStatus::LimitedCompany => 3,
            LegalStatus::PublicLimitedCompany => 4,
            LegalStatus::Charity => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LegalStatus::SoleTrader),
            1 => Some(LegalStatus::LimitedLiabilityPartnership),
            2 => Some(LegalStatus::OrdinaryPartnership),
            3 => Some(LegalStatus::LimitedCompany),
            4 => Some(LegalStatus::PublicLimitedCompany),
            5 => Some(LegalStatus::Charity),
            _ => None,
        }
    }
}

/// Input fields for [`Company::create`]
#[derive(Debug, Clone, Default)]
pub struct CompanyDraft {
    pub name: String,
    pub crn: String,
    pub incorporation_date: NaiveDateTime,
    pub sic_codes: Option<String>,
    pub legal_status: Option<LegalStatus>,
    pub trading_address_line_1: Option<String>,
    pub trading_address_line_2: Option<String>,
    pub trading_address_line_3: Option<String>,
    pub trading_address_line_4: Option<String>,
    pub trading_address_postcode: Option<String>,
    pub registered_address_line_1: Option<String>,
    pub registered_address_line_2: Option<String>,
    pub registered_address_line_3: Option<String>,
    pub registered_address_line_4: Option<String>,
    pub registered_address_postcode: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub position: Option<u8>,
    pub files: Vec<File>,
}

/// A business entity participating in a loan application
#[derive(Debug, Clone)]
pub struct Company {
    name: String,
    crn: String,
    incorporation_date: String,
    sic_codes: Option<String>,
    legal_status: Option<LegalStatus>,
    trading_address_line_1: Option<String>,
    trading_address_line_2: Option<String>,
    trading_address_line_3: Option<String>,
    trading_address_line_4: Option<String>,
    trading_address_postcode: Option<String>,
    registered_address_line_1: Option<String>,
    registered_address_line_2: Option<String>,
    registered_address_line_3: Option<String>,
    registered_address_line_4: Option<String>,
    registered_address_postcode: Option<String>,
    telephone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    notes: Option<String>,
    position: Option<u8>,
    files: Vec<File>,
}

impl Company {
    /// Validates the draft and constructs the record. Checks run in a fixed
    /// order and the first violated rule is returned.
    pub fn create(draft: CompanyDraft) -> Result<Self, ValidationError> {
        validation::validate_registration_number(&draft.crn)?;
        if let Some(sic_codes) = &draft.sic_codes {
            validation::validate_sic_codes(sic_codes)?;
        }
        if let Some(postcode) = &draft.trading_address_postcode {
            validation::validate_postcode(postcode)?;
        }
        if let Some(postcode) = &draft.registered_address_postcode {
            validation::validate_postcode(postcode)?;
        }
        if let Some(telephone) = &draft.telephone {
            validation::validate_telephone(telephone)?;
        }
        if let Some(email) = &draft.email {
            validation::validate_email(email)?;
        }
        if let Some(position) = draft.position {
            validation::validate_position(position)?;
        }
        for file in &draft.files {
            Self::check_category(file)?;
        }

        Ok(Self {
            name: draft.name,
            crn: draft.crn,
            incorporation_date: validation::format_date(draft.incorporation_date),
            sic_codes: draft.sic_codes,
            legal_status: draft.legal_status,
            trading_address_line_1: draft.trading_address_line_1,
            trading_address_line_2: draft.trading_address_line_2,
            trading_address_line_3: draft.trading_address_line_3,
            trading_address_line_4: draft.trading_address_line_4,
            trading_address_postcode: draft.trading_address_postcode,
            registered_address_line_1: draft.registered_address_line_1,
            registered_address_line_2: draft.registered_address_line_2,
            registered_address_line_3: draft.registered_address_line_3,
            registered_address_line_4: draft.registered_address_line_4,
            registered_address_postcode: draft.registered_address_postcode,
            telephone: draft.telephone,
            email: draft.email,
            website: draft.website,
            notes: draft.notes,
            position: draft.position,
            files: draft.files,
        })
    }

    fn check_category(file: &File) -> Result<(), ValidationError> {
        if !file.category().allows(EntityKind::Company) {
            return Err(ValidationError::CategoryNotAllowed {
                category: file.category().label.clone(),
                file: file.name_and_path().display().to_string(),
                kind: EntityKind::Company,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registration_number(&self) -> &str {
        &self.crn
    }

    /// Parses the stored incorporation date back out of the wire format
    pub fn incorporation_date(&self) -> Result<NaiveDateTime, ValidationError> {
        validation::parse_date(&self.incorporation_date)
    }

    pub fn sic_codes(&self) -> &str {
        self.sic_codes.as_deref().unwrap_or("")
    }

    /// Defaults to [`LegalStatus::LimitedCompany`] when not supplied
    pub fn legal_status(&self) -> LegalStatus {
        self.legal_status.unwrap_or(LegalStatus::LimitedCompany)
    }

    pub fn trading_address_line_1(&self) -> &str {
        self.trading_address_line_1.as_deref().unwrap_or("")
    }

    pub fn trading_address_line_2(&self) -> &str {
        self.trading_address_line_2.as_deref().unwrap_or("")
    }

    pub fn trading_address_line_3(&self) -> &str {
        self.trading_address_line_3.as_deref().unwrap_or("")
    }

    pub fn trading_address_line_4(&self) -> &str {
        self.trading_address_line_4.as_deref().unwrap_or("")
    }

    pub fn trading_address_postcode(&self) -> &str {
        self.trading_address_postcode.as_deref().unwrap_or("")
    }

    pub fn registered_address_line_1(&self) -> &str {
        self.registered_address_line_1.as_deref().unwrap_or("")
    }

    pub fn registered_address_line_2(&self) -> &str {
        self.registered_address_line_2.as_deref().unwrap_or("")
    }

    pub fn registered_address_line_3(&self) -> &str {
        self.registered_address_line_3.as_deref().unwrap_or("")
    }

    pub fn registered_address_line_4(&self) -> &str {
        self.registered_address_line_4.as_deref().unwrap_or("")
    }

    pub fn registered_address_postcode(&self) -> &str {
        self.registered_address_postcode.as_deref().unwrap_or("")
    }

    pub fn telephone(&self) -> &str {
        self.telephone.as_deref().unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn website(&self) -> &str {
        self.website.as_deref().unwrap_or("")
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    pub fn position(&self) -> u8 {
        self.position.unwrap_or(0)
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Mutable access for the upload step writing back storage paths
    pub fn files_mut(&mut self) -> &mut [File] {
        &mut self.files
    }

    /// Appends a supporting file, re-validating its category
    pub fn add_file(&mut self, file: File) -> Result<&mut Self, ValidationError> {
        Self::check_category(&file)?;
        self.files.push(file);
        Ok(self)
    }
}
