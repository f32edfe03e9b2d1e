//! library-cli - Terminal-based library catalog
//!
//! This library provides the core functionality for a small lending library:
//! books with a count of copies on the shelf, users with the ISBNs they have
//! borrowed, and a catalog that lends and takes back copies while keeping the
//! two consistent. The catalog is persisted as two `;`-delimited text files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (books and users)
//! - `catalog`: In-memory catalog with search and borrow/return
//! - `storage`: Text file codec and atomic file storage
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use library::catalog::Catalog;
//! use library::models::{Book, User};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_book(Book::new("Dune", "Frank Herbert", "B001", 5));
//! catalog.add_user(User::new("Alice", "U001"));
//! catalog.borrow_book("U001", "B001")?;
//! catalog.save_to_files("books.txt", "users.txt")?;
//! ```

pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use catalog::{Catalog, CheckoutError, LoadSummary};
pub use error::{LibraryError, LibraryResult};
