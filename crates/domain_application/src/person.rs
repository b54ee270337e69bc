//! Applicant person record

use chrono::NaiveDateTime;
use std::fmt;

use crate::category::EntityKind;
use crate::error::ValidationError;
use crate::file::File;
use crate::validation;

/// Gender as the remote system encodes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Wire encoding (male 0, female 1)
    pub fn code(&self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Honorific title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title {
    Mr,
    Mrs,
    Miss,
    Ms,
    Dr,
}

impl Title {
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Mrs => "Mrs",
            Title::Miss => "Miss",
            Title::Ms => "Ms",
            Title::Dr => "Dr",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input fields for [`Person::create`].
///
/// A draft carries unvalidated caller input; the factory is the only way to
/// turn it into a [`Person`].
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    pub forename: String,
    pub middle_name: Option<String>,
    pub surname: String,
    pub date_of_birth: NaiveDateTime,
    pub gender: Gender,
    pub title: Option<Title>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_line_4: Option<String>,
    pub address_postcode: Option<String>,
    pub day_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub position: Option<u8>,
    pub is_primary_contact: bool,
    pub files: Vec<File>,
    pub passport_forename: Option<String>,
    pub passport_middle_name: Option<String>,
    pub passport_surname: Option<String>,
}

/// A person participating in a loan application
#[derive(Debug, Clone)]
pub struct Person {
    forename: String,
    middle_name: Option<String>,
    surname: String,
    date_of_birth: String,
    gender: Gender,
    title: Option<Title>,
    address_line_1: Option<String>,
    address_line_2: Option<String>,
    address_line_3: Option<String>,
    address_line_4: Option<String>,
    address_postcode: Option<String>,
    day_phone: Option<String>,
    mobile_phone: Option<String>,
    email: Option<String>,
    notes: Option<String>,
    position: Option<u8>,
    is_primary_contact: bool,
    files: Vec<File>,
    passport_forename: Option<String>,
    passport_middle_name: Option<String>,
    passport_surname: Option<String>,
}

impl Person {
    /// Validates the draft and constructs the record. Checks run in a fixed
    /// order and the first violated rule is returned.
    pub fn create(draft: PersonDraft) -> Result<Self, ValidationError> {
        if let Some(postcode) = &draft.address_postcode {
            validation::validate_postcode(postcode)?;
        }
        if let Some(position) = draft.position {
            validation::validate_position(position)?;
        }
        for file in &draft.files {
            Self::check_category(file)?;
        }

        Ok(Self {
            forename: draft.forename,
            middle_name: draft.middle_name,
            surname: draft.surname,
            date_of_birth: validation::format_date(draft.date_of_birth),
            gender: draft.gender,
            title: draft.title,
            address_line_1: draft.address_line_1,
            address_line_2: draft.address_line_2,
            address_line_3: draft.address_line_3,
            address_line_4: draft.address_line_4,
            address_postcode: draft.address_postcode,
            day_phone: draft.day_phone,
            mobile_phone: draft.mobile_phone,
            email: draft.email,
            notes: draft.notes,
            position: draft.position,
            is_primary_contact: draft.is_primary_contact,
            files: draft.files,
            passport_forename: draft.passport_forename,
            passport_middle_name: draft.passport_middle_name,
            passport_surname: draft.passport_surname,
        })
    }

    fn check_category(file: &File) -> Result<(), ValidationError> {
        if !file.category().allows(EntityKind::Person) {
            return Err(ValidationError::CategoryNotAllowed {
                category: file.category().label.clone(),
                file: file.name_and_path().display().to_string(),
                kind: EntityKind::Person,
            });
        }
        Ok(())
    }

    pub fn forename(&self) -> &str {
        &self.forename
    }

    pub fn middle_name(&self) -> &str {
        self.middle_name.as_deref().unwrap_or("")
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Parses the stored date of birth back out of the wire format
    pub fn date_of_birth(&self) -> Result<NaiveDateTime, ValidationError> {
        validation::parse_date(&self.date_of_birth)
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn title(&self) -> Option<Title> {
        self.title
    }

    pub fn address_line_1(&self) -> &str {
        self.address_line_1.as_deref().unwrap_or("")
    }

    pub fn address_line_2(&self) -> &str {
        self.address_line_2.as_deref().unwrap_or("")
    }

    pub fn address_line_3(&self) -> &str {
        self.address_line_3.as_deref().unwrap_or("")
    }

    pub fn address_line_4(&self) -> &str {
        self.address_line_4.as_deref().unwrap_or("")
    }

    pub fn address_postcode(&self) -> &str {
        self.address_postcode.as_deref().unwrap_or("")
    }

    pub fn day_phone(&self) -> &str {
        self.day_phone.as_deref().unwrap_or("")
    }

    pub fn mobile_phone(&self) -> &str {
        self.mobile_phone.as_deref().unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    pub fn position(&self) -> u8 {
        self.position.unwrap_or(0)
    }

    pub fn is_primary_contact(&self) -> bool {
        self.is_primary_contact
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

    /// "{forename} {surname}", as used for the case's primary contact
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    pub fn passport_forename(&self) -> &str {
        self.passport_forename.as_deref().unwrap_or("")
    }

    pub fn passport_middle_name(&self) -> &str {
        self.passport_middle_name.as_deref().unwrap_or("")
    }

    pub fn passport_surname(&self) -> &str {
        self.passport_surname.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PersonDraft {
        PersonDraft {
            forename: "Jane".to_string(),
            surname: "Doe".to_string(),
            gender: Gender::Female,
            title: Some(Title::Dr),
            address_postcode: Some("AB1 2CD".to_string()),
            position: Some(validation::position::DIRECTOR),
            is_primary_contact: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let person = Person::create(valid_draft()).unwrap();
        assert_eq!(person.middle_name(), "");
        assert_eq!(person.notes(), "");
        assert_eq!(person.position(), validation::position::DIRECTOR);
        assert_eq!(person.full_name(), "Jane Doe");
    }

    #[test]
    fn test_invalid_postcode_rejected() {
        let mut draft = valid_draft();
        draft.address_postcode = Some("abcdef".to_string());
        assert!(matches!(
            Person::create(draft),
            Err(ValidationError::InvalidPostcode(_))
        ));
    }

    #[test]
    fn test_invalid_position_rejected() {
        let mut draft = valid_draft();
        draft.position = Some(99);
        assert!(matches!(
            Person::create(draft),
            Err(ValidationError::InvalidPosition(99))
        ));
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.code(), 0);
        assert_eq!(Gender::Female.code(), 1);
        assert_eq!(Gender::from_code(1), Some(Gender::Female));
        assert_eq!(Gender::from_code(2), None);
    }
}
