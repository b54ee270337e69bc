//! Loan facility record

use crate::category::EntityKind;
use crate::error::ValidationError;
use crate::file::File;

/// The facility being applied for
#[derive(Debug, Clone)]
pub struct Loan {
    amount: u64,
    use_of_funds: String,
    files: Vec<File>,
}

impl Loan {
    /// Constructs the record; each attached file's category must be legal
    /// for a loan. The amount is non-negative by type.
    pub fn new(
        amount: u64,
        use_of_funds: impl Into<String>,
        files: Vec<File>,
    ) -> Result<Self, ValidationError> {
        for file in &files {
            Self::check_category(file)?;
        }
        Ok(Self {
            amount,
            use_of_funds: use_of_funds.into(),
            files,
        })
    }

    fn check_category(file: &File) -> Result<(), ValidationError> {
        if !file.category().allows(EntityKind::Loan) {
            return Err(ValidationError::CategoryNotAllowed {
                category: file.category().label.clone(),
                file: file.name_and_path().display().to_string(),
                kind: EntityKind::Loan,
            });
        }
        Ok(())
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn use_of_funds(&self) -> &str {
        &self.use_of_funds
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loan() {
        let loan = Loan::new(12345, "working capital", Vec::new()).unwrap();
        assert_eq!(loan.amount(), 12345);
        assert_eq!(loan.use_of_funds(), "working capital");
        assert!(loan.files().is_empty());
    }
}
