//! Core data models for the library catalog
//!
//! This module contains the two entities the catalog owns: books (one record
//! per title, with an available-copy counter) and users (patrons with the
//! ISBNs they currently have checked out).

pub mod book;
pub mod user;
mod validation;

pub use book::{Book, BookUnavailable, BookValidationError};
pub use user::{User, UserValidationError};
pub use validation::RESERVED_CHARS;
