//! Strongly-typed identifiers for remote entities
//!
//! Newtype wrappers prevent accidental mixing of identifier types. Unlike
//! locally-minted UUIDs, these wrap the integer primary keys the remote
//! case-management system hands out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a submitted case in the remote system (its `CasePK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(i64);

impl CaseId {
    /// Wraps a raw case primary key
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying primary key value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE-{}", self.0)
    }
}

impl FromStr for CaseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip prefix if present
        let raw = s.strip_prefix("CASE-").unwrap_or(s);
        Ok(Self(raw.parse()?))
    }
}

impl From<i64> for CaseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<CaseId> for i64 {
    fn from(id: CaseId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_display() {
        let id = CaseId::new(999);
        assert_eq!(id.to_string(), "CASE-999");
    }

    #[test]
    fn test_case_id_parsing() {
        let parsed: CaseId = "CASE-42".parse().unwrap();
        assert_eq!(parsed, CaseId::new(42));

        let bare: CaseId = "42".parse().unwrap();
        assert_eq!(bare, parsed);
    }

    #[test]
    fn test_case_id_serde_transparent() {
        let id = CaseId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: CaseId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
