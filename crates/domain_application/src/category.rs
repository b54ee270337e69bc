//! Document category taxonomy
//!
//! Categories classify what a supporting document is ("Searches", "Guarantor
//! Details", ...) and restrict which entity kinds may hold it. The taxonomy
//! is data: a [`CategoryTable`] loaded from JSON, with a builtin table
//! embedded at compile time. Validation call sites consult the table, so a
//! taxonomy revision is a data edit rather than a code change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::ValidationError;

/// The kinds of entity a document category can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Company,
    Person,
    Loan,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Company => write!(f, "company"),
            EntityKind::Person => write!(f, "person"),
            EntityKind::Loan => write!(f, "loan"),
        }
    }
}

/// One entry of the category taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable numeric id used on the wire (`CategoryID`)
    pub id: u32,
    /// Human-readable label, unique within a table
    pub label: String,
    kinds: Vec<EntityKind>,
}

impl Category {
    /// Returns whether entities of `kind` may hold documents of this category
    pub fn allows(&self, kind: EntityKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Errors raised while loading a category table
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("unable to read category table from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("category table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("category table contains duplicate id {0}")]
    DuplicateId(u32),

    #[error("category table contains duplicate label '{0}'")]
    DuplicateLabel(String),
}

static BUILTIN: LazyLock<CategoryTable> = LazyLock::new(|| {
    CategoryTable::from_json_str(include_str!("data/categories.json"))
        .expect("embedded category table is valid")
});

/// The versioned enumeration of document categories
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Parses a table from its JSON representation, rejecting duplicates
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;

        for (index, category) in categories.iter().enumerate() {
            for earlier in &categories[..index] {
                if earlier.id == category.id {
                    return Err(TaxonomyError::DuplicateId(category.id));
                }
                if earlier.label == category.label {
                    return Err(TaxonomyError::DuplicateLabel(category.label.clone()));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Loads a table from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the table embedded in the crate
    pub fn builtin() -> &'static CategoryTable {
        &BUILTIN
    }

    /// Looks a category up by its numeric id
    pub fn by_id(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks a category up by its label
    pub fn by_label(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Resolves an id into an owned category entry
    pub fn resolve(&self, id: u32) -> Result<Category, ValidationError> {
        self.by_id(id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownCategory(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = CategoryTable::builtin();
        assert!(table.by_label("Searches").is_some());
        assert!(table.by_label("Guarantor Details").is_some());
        assert!(table.by_label("Nonexistent").is_none());
    }

    #[test]
    fn test_kind_restrictions() {
        let table = CategoryTable::builtin();

        let searches = table.by_label("Searches").unwrap();
        assert!(searches.allows(EntityKind::Company));
        assert!(!searches.allows(EntityKind::Person));
        assert!(!searches.allows(EntityKind::Loan));

        let other = table.by_label("Other").unwrap();
        assert!(other.allows(EntityKind::Company));
        assert!(other.allows(EntityKind::Person));
        assert!(other.allows(EntityKind::Loan));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let err = CategoryTable::builtin().resolve(9999).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCategory(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            { "id": 1, "label": "A", "kinds": ["loan"] },
            { "id": 1, "label": "B", "kinds": ["loan"] }
        ]"#;
        assert!(matches!(
            CategoryTable::from_json_str(json),
            Err(TaxonomyError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let json = r#"[
            { "id": 1, "label": "A", "kinds": ["loan"] },
            { "id": 2, "label": "A", "kinds": ["person"] }
        ]"#;
        assert!(matches!(
            CategoryTable::from_json_str(json),
            Err(TaxonomyError::DuplicateLabel(_))
        ));
    }
}
