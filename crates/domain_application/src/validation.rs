//! Field validation rules
//!
//! The regex table the record factories enforce. Patterns are compiled once
//! and shared; each check returns the offending value inside its
//! [`ValidationError`] variant so messages stay deterministic.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;
use validator::ValidateEmail;

use crate::error::ValidationError;

/// Wire format for stored timestamps (second precision)
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UK postcode, BFPO and Channel Islands variants included
static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*((([A-Z]{1,2}[0-9][A-Z0-9]?|ASCN|STHL|TDCU|BBND|[BFS]IQQ|PCRN|TKCA) ?[0-9][A-Z]{2}|BFPO ?[0-9]{1,4}|(KY[0-9]|MSR|VG|AI)[ -]?[0-9]{4}|[A-Z]{2} ?[0-9]{2}|GE ?CX|GIR ?0A{2}|SAN ?TA1))\s*$",
    )
    .expect("postcode pattern compiles")
});

/// Company registration number: 8 digits, 2 letters + 6 digits, or R + 7 digits
static REGISTRATION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(([0-9]{8})|([A-Z]{2}[0-9]{6})|(R[0-9]{7}))$")
        .expect("registration number pattern compiles")
});

/// UK landline/mobile numbers, +44 and 0 prefixes
static TELEPHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:\(?(?:0(?:0|11)\)?[\s-]?\(?|\+)44\)?[\s-]?(?:\(?0\)?[\s-]?)?)|(?:\(?0))(?:(?:\d{5}\)?[\s-]?\d{4,5})|(?:\d{4}\)?[\s-]?(?:\d{5}|\d{3}[\s-]?\d{3}))|(?:\d{3}\)?[\s-]?\d{3}[\s-]?\d{3,4})|(?:\d{2}\)?[\s-]?\d{4}[\s-]?\d{4}))$",
    )
    .expect("telephone pattern compiles")
});

/// Comma-separated groups of 5 digits
static SIC_CODES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(,\s?\d{5})*$").expect("SIC codes pattern compiles"));

/// Role flags carried in the position bitmask
pub mod position {
    pub const DIRECTOR: u8 = 1;
    pub const GUARANTOR: u8 = 2;
    pub const PSC: u8 = 4;
    pub const NO_CONTACT: u8 = 8;
    /// Sum of every defined flag; the bitmask may not exceed it
    pub const ALL: u8 = DIRECTOR + GUARANTOR + PSC + NO_CONTACT;
}

pub fn validate_postcode(value: &str) -> Result<(), ValidationError> {
    if POSTCODE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPostcode(value.to_string()))
    }
}

pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    if REGISTRATION_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCrn(value.to_string()))
    }
}

pub fn validate_telephone(value: &str) -> Result<(), ValidationError> {
    if TELEPHONE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTelephone(value.to_string()))
    }
}

pub fn validate_sic_codes(value: &str) -> Result<(), ValidationError> {
    if SIC_CODES.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSicCodes(value.to_string()))
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

pub fn validate_position(value: u8) -> Result<(), ValidationError> {
    if value > position::ALL {
        Err(ValidationError::InvalidPosition(value))
    } else {
        Ok(())
    }
}

/// Formats a timestamp into the wire format records store
pub fn format_date(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parses a stored timestamp back out of the wire format
pub fn parse_date(value: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|_| ValidationError::DateDecode(value.to_string()))
}
