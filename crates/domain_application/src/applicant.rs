//! Applicant sum type
//!
//! An applicant standing behind an application is either a person or a
//! company; the enum makes the orchestrator's handling exhaustive at compile
//! time instead of a runtime type check.

use crate::company::Company;
use crate::person::Person;

/// A person or company participating in an application
#[derive(Debug, Clone)]
pub enum Applicant {
    Person(Person),
    Company(Company),
}

impl From<Person> for Applicant {
    fn from(person: Person) -> Self {
        Applicant::Person(person)
    }
}

impl From<Company> for Applicant {
    fn from(company: Company) -> Self {
        Applicant::Company(company)
    }
}

impl Applicant {
    /// Returns the inner person, if this applicant is one
    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Applicant::Person(person) => Some(person),
            Applicant::Company(_) => None,
        }
    }

    /// Returns the inner company, if this applicant is one
    pub fn as_company(&self) -> Option<&Company> {
        match self {
            Applicant::Company(company) => Some(company),
            Applicant::Person(_) => None,
        }
    }
}
