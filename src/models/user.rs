//! User model
//!
//! A patron of the library and the ISBNs they currently have checked out.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::find_reserved;

/// A library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    id: String,
    /// Checked-out ISBNs in borrow order; duplicates are kept
    #[serde(default)]
    borrowed_isbns: Vec<String>,
}

impl User {
    /// Create a new user with nothing borrowed
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            borrowed_isbns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user ID, which is also the user's key in the catalog
    pub fn id(&self) -> &str {
        &self.id
    }

    /// ISBNs currently checked out, oldest first
    pub fn borrowed_isbns(&self) -> &[String] {
        &self.borrowed_isbns
    }

    /// Whether the ISBN appears anywhere in the borrowed list
    pub fn has_borrowed(&self, isbn: &str) -> bool {
        self.borrowed_isbns.iter().any(|b| b == isbn)
    }

    /// Record a checkout. No existence check and no de-duplication.
    pub fn borrow_book(&mut self, isbn: impl Into<String>) {
        self.borrowed_isbns.push(isbn.into());
    }

    /// Record a return, dropping every entry for the ISBN.
    ///
    /// Returns how many entries were removed.
    pub fn return_book(&mut self, isbn: &str) -> usize {
        let before = self.borrowed_isbns.len();
        self.borrowed_isbns.retain(|b| b != isbn);
        before - self.borrowed_isbns.len()
    }

    /// Validate the user's fields before they enter the catalog
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        if self.id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }

        for (field, value) in [("name", &self.name), ("id", &self.id)] {
            if let Some(ch) = find_reserved(value) {
                return Err(UserValidationError::ReservedCharacter { field, ch });
            }
        }

        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyId,
    ReservedCharacter { field: &'static str, ch: char },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "User name cannot be empty"),
            Self::EmptyId => write!(f, "User ID cannot be empty"),
            Self::ReservedCharacter { field, ch } => {
                write!(f, "User {} cannot contain {:?}", field, ch)
            }
        }
    }
}

impl std::error::Error for UserValidationError {}
