//! Domain validation errors
//!
//! Every rule a record factory can reject is a distinct variant, so callers
//! can react programmatically and error messages stay deterministic.

use thiserror::Error;

use crate::category::EntityKind;

/// Errors raised while constructing or mutating domain records
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The supporting file's path does not exist
    #[error("'{0}' doesn't exist")]
    FileNotFound(String),

    /// The supporting file's path is not a regular file
    #[error("'{0}' is not a file")]
    NotAFile(String),

    /// The supporting file exists but cannot be opened for reading
    #[error("'{0}' is not readable")]
    FileNotReadable(String),

    /// The category id is not present in the category table
    #[error("'{0}' is not a known document category")]
    UnknownCategory(String),

    /// The category is not legal for the entity kind holding the file
    #[error("'{category}' on file '{file}' is not a valid {kind} category")]
    CategoryNotAllowed {
        category: String,
        file: String,
        kind: EntityKind,
    },

    /// Not a valid UK postcode
    #[error("'{0}' is not a valid UK postcode")]
    InvalidPostcode(String),

    /// Not a valid company registration number
    #[error("'{0}' is not a valid company registration number")]
    InvalidCrn(String),

    /// Not a valid comma-separated list of SIC codes
    #[error("'{0}' is not a valid comma separated list of SIC codes")]
    InvalidSicCodes(String),

    /// Not a valid UK phone number
    #[error("'{0}' is not a valid UK phone number")]
    InvalidTelephone(String),

    /// Not a plausible email address
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    /// Position bitmask outside the defined flag range
    #[error("{0} is not a valid position bitmask")]
    InvalidPosition(u8),

    /// A stored timestamp failed to parse back out of its wire format.
    /// This is an internal consistency fault, not a user input error.
    #[error("stored timestamp '{0}' could not be decoded")]
    DateDecode(String),
}
