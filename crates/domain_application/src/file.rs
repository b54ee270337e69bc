//! Supporting-file record
//!
//! Describes one document attached to an application entity: where it lives
//! locally, what it is, and (after a successful upload) the storage path the
//! remote system assigned to it. Local accessibility and category membership
//! are checked at construction; the upload path is the only field written
//! afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{Category, CategoryTable};
use crate::error::ValidationError;

/// One supporting document
#[derive(Debug, Clone)]
pub struct File {
    name_and_path: PathBuf,
    mime_type: String,
    description: String,
    category: Category,
    upload_path: Option<String>,
}

impl File {
    /// Creates a file record, verifying the local path references an
    /// existing, regular, readable file and that the category id exists in
    /// the table.
    pub fn create(
        path: impl Into<PathBuf>,
        mime_type: impl Into<String>,
        description: impl Into<String>,
        category_id: u32,
        table: &CategoryTable,
    ) -> Result<Self, ValidationError> {
        let path = path.into();
        let display = path.display().to_string();

        let metadata =
            fs::metadata(&path).map_err(|_| ValidationError::FileNotFound(display.clone()))?;
        if !metadata.is_file() {
            return Err(ValidationError::NotAFile(display));
        }
        // Readability probe; the handle is dropped straight away
        fs::File::open(&path).map_err(|_| ValidationError::FileNotReadable(display))?;

        let category = table.resolve(category_id)?;

        Ok(Self {
            name_and_path: path,
            mime_type: mime_type.into(),
            description: description.into(),
            category,
            upload_path: None,
        })
    }

    pub fn name_and_path(&self) -> &Path {
        &self.name_and_path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The storage path assigned by the remote system, once uploaded
    pub fn upload_path(&self) -> Option<&str> {
        self.upload_path.as_deref()
    }

    /// Records the server-assigned storage path. Last write wins.
    pub fn set_upload_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.upload_path = Some(path.into());
        self
    }

    /// Basename without its final extension, as sent in the case payload
    pub fn file_name(&self) -> String {
        self.name_and_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("file-record-{}-{name}", std::process::id()));
        let mut handle = fs::File::create(&path).unwrap();
        handle.write_all(b"contents").unwrap();
        path
    }

    fn other_category() -> u32 {
        CategoryTable::builtin().by_label("Other").unwrap().id
    }

    #[test]
    fn test_create_and_read_back() {
        let path = temp_file("create.pdf");
        let file = File::create(
            &path,
            "application/pdf",
            "a supporting document",
            other_category(),
            CategoryTable::builtin(),
        )
        .unwrap();

        assert_eq!(file.mime_type(), "application/pdf");
        assert_eq!(file.description(), "a supporting document");
        assert_eq!(file.upload_path(), None);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_path_rejected() {
        let err = File::create(
            "/no/such/file.pdf",
            "application/pdf",
            "",
            other_category(),
            CategoryTable::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_rejected() {
        let err = File::create(
            std::env::temp_dir(),
            "application/pdf",
            "",
            other_category(),
            CategoryTable::builtin(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NotAFile(_)));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let path = temp_file("category.pdf");
        let err = File::create(&path, "application/pdf", "", 9999, CategoryTable::builtin())
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCategory(_)));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_upload_path_last_write_wins() {
        let path = temp_file("upload.pdf");
        let mut file = File::create(
            &path,
            "application/pdf",
            "",
            other_category(),
            CategoryTable::builtin(),
        )
        .unwrap();

        file.set_upload_path("generated/first");
        file.set_upload_path("generated/second");
        assert_eq!(file.upload_path(), Some("generated/second"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_file_name_strips_extension() {
        let path = temp_file("statement.march.pdf");
        let file = File::create(
            &path,
            "application/pdf",
            "",
            other_category(),
            CategoryTable::builtin(),
        )
        .unwrap();
        assert!(file.file_name().ends_with("statement.march"));
        fs::remove_file(path).unwrap();
    }
}
