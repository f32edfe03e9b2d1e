//! Custom error types for the library catalog
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::catalog::CheckoutError;

/// The main error type for catalog operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// No copies of a book left to lend
    #[error("No copies available for book: {isbn}")]
    Unavailable { isbn: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LibraryError {
    /// Create a "not found" error for books
    pub fn book_not_found(isbn: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: isbn.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: id.into(),
        }
    }

    /// Create a "duplicate" error for books
    pub fn duplicate_book(isbn: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Book",
            identifier: isbn.into(),
        }
    }

    /// Create a "duplicate" error for users
    pub fn duplicate_user(id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "User",
            identifier: id.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<CheckoutError> for LibraryError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::UserNotFound(id) => Self::user_not_found(id),
            CheckoutError::BookNotFound(isbn) => Self::book_not_found(isbn),
            CheckoutError::NoCopiesAvailable(isbn) => Self::Unavailable { isbn },
        }
    }
}

/// Result type alias for catalog operations
pub type LibraryResult<T> = Result<T, LibraryError>;
