//! Book model
//!
//! One catalog record per title, carrying the number of copies currently on
//! the shelf.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::find_reserved;

/// A title in the catalog and its available-copy counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
    /// Copies available for borrowing
    quantity: u32,
}

impl Book {
    /// Create a new book record
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            quantity,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The ISBN, which is also the book's key in the catalog
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Number of copies available for borrowing
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether at least one copy can be lent out
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Lend out one copy
    ///
    /// Fails without touching the counter when no copies are left.
    pub fn borrow(&mut self) -> Result<(), BookUnavailable> {
        if self.quantity == 0 {
            return Err(BookUnavailable);
        }
        self.quantity -= 1;
        Ok(())
    }

    /// Put one copy back on the shelf
    ///
    /// There is no upper bound: returning more copies than were borrowed
    /// raises the counter past the original stock.
    pub fn return_copy(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Validate the book's fields before it enters the catalog
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }

        if self.isbn.trim().is_empty() {
            return Err(BookValidationError::EmptyIsbn);
        }

        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("isbn", &self.isbn),
        ] {
            if let Some(ch) = find_reserved(value) {
                return Err(BookValidationError::ReservedCharacter { field, ch });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.isbn)
    }
}

/// Returned by [`Book::borrow`] when every copy is already lent out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookUnavailable;

impl fmt::Display for BookUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book not available")
    }
}

impl std::error::Error for BookUnavailable {}

/// Validation errors for books
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyIsbn,
    ReservedCharacter { field: &'static str, ch: char },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Book title cannot be empty"),
            Self::EmptyIsbn => write!(f, "Book ISBN cannot be empty"),
            Self::ReservedCharacter { field, ch } => {
                write!(f, "Book {} cannot contain {:?}", field, ch)
            }
        }
    }
}

impl std::error::Error for BookValidationError {}
