//! Storage layer for the library catalog
//!
//! The catalog lives in two plain text files, one for books and one for
//! users. `codec` turns lines into records and back, `file_io` handles
//! whole-file reads and atomic replacement, and `CatalogStore` ties a pair of
//! file locations to the catalog load/save calls.

pub mod codec;
pub mod file_io;

use std::path::{Path, PathBuf};

pub use codec::{parse_books, parse_users, Parsed};
pub use file_io::{read_json, write_files_atomic, write_json_atomic};

use crate::catalog::Catalog;
use crate::config::paths::LibraryPaths;
use crate::config::settings::Settings;
use crate::error::LibraryError;

/// The pair of files backing one catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    books_file: PathBuf,
    users_file: PathBuf,
}

impl CatalogStore {
    /// Create a store over explicit file locations
    pub fn new(books_file: PathBuf, users_file: PathBuf) -> Self {
        Self {
            books_file,
            users_file,
        }
    }

    /// Resolve the file locations from paths and settings overrides
    pub fn from_config(paths: &LibraryPaths, settings: &Settings) -> Self {
        Self::new(
            settings
                .books_file
                .clone()
                .unwrap_or_else(|| paths.books_file()),
            settings
                .users_file
                .clone()
                .unwrap_or_else(|| paths.users_file()),
        )
    }

    pub fn books_file(&self) -> &Path {
        &self.books_file
    }

    pub fn users_file(&self) -> &Path {
        &self.users_file
    }

    /// Whether either backing file is present
    pub fn exists(&self) -> bool {
        self.books_file.exists() || self.users_file.exists()
    }

    /// Load the catalog, starting empty if neither file exists yet
    pub fn load(&self) -> Result<Catalog, LibraryError> {
        let mut catalog = Catalog::new();
        if self.exists() {
            catalog.load_from_files(&self.books_file, &self.users_file)?;
        }
        Ok(catalog)
    }

    /// Write the catalog to both files
    pub fn save(&self, catalog: &Catalog) -> Result<(), LibraryError> {
        catalog.save_to_files(&self.books_file, &self.users_file)
    }

    /// Create both files empty unless the store already exists
    pub fn initialize(&self) -> Result<(), LibraryError> {
        if self.exists() {
            return Ok(());
        }
        self.save(&Catalog::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, User};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CatalogStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(
            temp_dir.path().join("books.txt"),
            temp_dir.path().join("users.txt"),
        );
        (temp_dir, store)
    }

    #[test]
    fn test_load_without_files_is_empty() {
        let (_temp_dir, store) = create_test_store();
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_creates_empty_files() {
        let (_temp_dir, store) = create_test_store();
        store.initialize().unwrap();

        assert_eq!(fs::read_to_string(store.books_file()).unwrap(), "");
        assert_eq!(fs::read_to_string(store.users_file()).unwrap(), "");
    }

    #[test]
    fn test_initialize_keeps_existing_data() {
        let (_temp_dir, store) = create_test_store();
        let mut catalog = Catalog::new();
        catalog.add_book(Book::new("Dune", "Frank Herbert", "B001", 5));
        store.save(&catalog).unwrap();

        store.initialize().unwrap();
        assert_eq!(store.load().unwrap().book_count(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, store) = create_test_store();
        let mut catalog = Catalog::new();
        catalog.add_book(Book::new("Dune", "Frank Herbert", "B001", 5));
        catalog.add_user(User::new("Alice", "U001"));
        catalog.borrow_book("U001", "B001").unwrap();

        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.search_by_isbn("B001").unwrap().quantity(), 4);
        assert_eq!(loaded.user("U001").unwrap().borrowed_isbns(), ["B001"]);
    }

    #[test]
    fn test_one_missing_file_is_an_error() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.books_file(), "Dune;Frank Herbert;B001;5\n").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_from_config_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let store = CatalogStore::from_config(&paths, &Settings::default());
        assert_eq!(store.books_file(), paths.books_file());

        let settings = Settings {
            users_file: Some(temp_dir.path().join("patrons.txt")),
            ..Settings::default()
        };
        let store = CatalogStore::from_config(&paths, &settings);
        assert_eq!(store.books_file(), paths.books_file());
        assert_eq!(store.users_file(), temp_dir.path().join("patrons.txt"));
    }
}
