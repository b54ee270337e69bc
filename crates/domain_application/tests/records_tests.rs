//! Comprehensive tests for the application domain records

use chrono::NaiveDate;
use proptest::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use domain_application::validation::{self, position};
use domain_application::{
    CategoryTable, Company, CompanyDraft, EntityKind, File, Gender, LegalStatus, Loan, Person,
    PersonDraft, Title, ValidationError,
};

fn temp_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("records-{}-{name}", std::process::id()));
    let mut handle = fs::File::create(&path).unwrap();
    handle.write_all(b"document body").unwrap();
    path
}

fn file_with_category(name: &str, label: &str) -> File {
    let table = CategoryTable::builtin();
    let category = table.by_label(label).unwrap();
    let path = temp_file(name);
    File::create(&path, "application/pdf", "test document", category.id, table).unwrap()
}

// ============================================================================
// Category restrictions across entity kinds
// ============================================================================

#[test]
fn person_rejects_company_only_category() {
    let file = file_with_category("searches.pdf", "Searches");
    let err = Person::create(PersonDraft {
        forename: "Jo".to_string(),
        surname: "Bloggs".to_string(),
        files: vec![file],
        ..Default::default()
    })
    .unwrap_err();

    match err {
        ValidationError::CategoryNotAllowed { kind, .. } => assert_eq!(kind, EntityKind::Person),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn company_accepts_company_category_and_rejects_person_one() {
    let allowed = file_with_category("accounts.pdf", "Company Accounts");
    let company = Company::create(CompanyDraft {
        name: "Acme Ltd".to_string(),
        crn: "12345678".to_string(),
        files: vec![allowed],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(company.files().len(), 1);

    let forbidden = file_with_category("guarantor.pdf", "Guarantor Details");
    let err = Company::create(CompanyDraft {
        name: "Acme Ltd".to_string(),
        crn: "12345678".to_string(),
        files: vec![forbidden],
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ValidationError::CategoryNotAllowed { .. }));
}

#[test]
fn loan_restricts_categories_and_add_file_revalidates() {
    let sourcing = file_with_category("sourcing.pdf", "Sourcing Results");
    let mut loan = Loan::new(50_000, "stock purchase", vec![sourcing]).unwrap();

    let other = file_with_category("other.pdf", "Other");
    loan.add_file(other).unwrap();
    assert_eq!(loan.files().len(), 2);

    let company_only = file_with_category("survey.pdf", "C19 Survey");
    assert!(matches!(
        loan.add_file(company_only),
        Err(ValidationError::CategoryNotAllowed { .. })
    ));
    assert_eq!(loan.files().len(), 2);
}

#[test]
fn add_file_after_construction_keeps_chaining() {
    let mut person = Person::create(PersonDraft {
        forename: "Amy".to_string(),
        surname: "Pond".to_string(),
        ..Default::default()
    })
    .unwrap();

    person
        .add_file(file_with_category("id.pdf", "Proof of Identity"))
        .unwrap()
        .add_file(file_with_category("addr.pdf", "Proof of Address"))
        .unwrap();
    assert_eq!(person.files().len(), 2);
}

// ============================================================================
// Date round-trips
// ============================================================================

#[test]
fn company_incorporation_date_round_trips_at_second_precision() {
    let input = NaiveDate::from_ymd_opt(2001, 1, 1)
        .unwrap()
        .and_hms_opt(1, 1, 1)
        .unwrap();

    let company = Company::create(CompanyDraft {
        name: "Acme Ltd".to_string(),
        crn: "AB123456".to_string(),
        incorporation_date: input,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(company.incorporation_date().unwrap(), input);
}

#[test]
fn person_date_of_birth_round_trips_at_second_precision() {
    let input = NaiveDate::from_ymd_opt(2002, 2, 2)
        .unwrap()
        .and_hms_opt(2, 2, 2)
        .unwrap();

    let person = Person::create(PersonDraft {
        forename: "Rory".to_string(),
        surname: "Williams".to_string(),
        date_of_birth: input,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(person.date_of_birth().unwrap(), input);
    assert_eq!(
        validation::format_date(person.date_of_birth().unwrap()),
        "2002-02-02 02:02:02"
    );
}

// ============================================================================
// Field rules
// ============================================================================

#[test]
fn registration_number_shapes() {
    for crn in ["12345678", "AB123456", "R1234567"] {
        let company = Company::create(CompanyDraft {
            name: "Acme Ltd".to_string(),
            crn: crn.to_string(),
            ..Default::default()
        });
        assert!(company.is_ok(), "rejected {crn}");
    }

    assert!(matches!(
        Company::create(CompanyDraft {
            name: "Acme Ltd".to_string(),
            crn: "abcdefgh".to_string(),
            ..Default::default()
        }),
        Err(ValidationError::InvalidCrn(_))
    ));
}

#[test]
fn person_titles_and_position_flags() {
    let person = Person::create(PersonDraft {
        forename: "Martha".to_string(),
        surname: "Jones".to_string(),
        gender: Gender::Female,
        title: Some(Title::Miss),
        position: Some(position::DIRECTOR | position::GUARANTOR),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(person.title().unwrap().as_str(), "Miss");
    assert_eq!(person.position(), 3);
    assert_eq!(person.gender(), Gender::Female);
}

#[test]
fn legal_status_defaults_to_limited_company() {
    let company = Company::create(CompanyDraft {
        name: "Acme Ltd".to_string(),
        crn: "12345678".to_string(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(company.legal_status(), LegalStatus::LimitedCompany);
    assert_eq!(company.legal_status().code(), 3);
}

// ============================================================================
// Rejection properties over arbitrary malformed input
// ============================================================================

proptest! {
    #[test]
    fn letters_only_strings_are_never_postcodes(value in "[a-z]{6,12}") {
        prop_assert!(validation::validate_postcode(&value).is_err());
    }

    #[test]
    fn letters_only_strings_are_never_registration_numbers(value in "[a-z]{8}") {
        prop_assert!(validation::validate_registration_number(&value).is_err());
    }

    #[test]
    fn short_digit_runs_are_never_sic_codes(value in "[0-9]{1,4}") {
        prop_assert!(validation::validate_sic_codes(&value).is_err());
    }
}
