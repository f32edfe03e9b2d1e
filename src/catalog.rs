//! The in-memory library catalog
//!
//! `Catalog` owns every book (keyed by ISBN) and every user (keyed by user
//! ID). Besides plain add/remove/search it provides the borrow/return
//! transaction, which keeps a book's available-copy counter and a user's
//! borrowed list moving together, and the whole-catalog load/save against
//! the two delimited text files.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::error::LibraryResult;
use crate::models::{Book, User};
use crate::storage::{codec, file_io};

/// Why a borrow or return was refused
///
/// In every case neither the book nor the user was modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("No copies available for book: {0}")]
    NoCopiesAvailable(String),
}

/// Counts reported by a successful [`Catalog::load_from_files`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub books: usize,
    pub users: usize,
    /// Malformed lines plus repeated keys, across both files
    pub skipped: usize,
}

/// All book and user records of one library
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: HashMap<String, Book>,
    users: HashMap<String, User>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book unless its ISBN is already taken.
    ///
    /// Returns `false` and leaves the catalog unchanged on a duplicate ISBN.
    pub fn add_book(&mut self, book: Book) -> bool {
        if self.books.contains_key(book.isbn()) {
            return false;
        }
        self.books.insert(book.isbn().to_string(), book);
        true
    }

    /// Remove a book by ISBN. Returns whether it existed.
    ///
    /// Users who still have the ISBN in their borrowed list keep it.
    pub fn remove_book(&mut self, isbn: &str) -> bool {
        self.books.remove(isbn).is_some()
    }

    /// Add a user unless the ID is already taken
    pub fn add_user(&mut self, user: User) -> bool {
        if self.users.contains_key(user.id()) {
            return false;
        }
        self.users.insert(user.id().to_string(), user);
        true
    }

    /// Remove a user by ID. Returns whether they existed.
    pub fn remove_user(&mut self, id: &str) -> bool {
        self.users.remove(id).is_some()
    }

    /// Books whose title equals `title` exactly, in no particular order
    pub fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.books
            .values()
            .filter(|b| b.title() == title)
            .cloned()
            .collect()
    }

    /// Books whose author equals `author` exactly, in no particular order
    pub fn search_by_author(&self, author: &str) -> Vec<Book> {
        self.books
            .values()
            .filter(|b| b.author() == author)
            .cloned()
            .collect()
    }

    /// Look a book up by ISBN
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Look a book up by ISBN for in-place changes.
    ///
    /// The handle borrows the catalog mutably, so it cannot outlive the next
    /// insert or removal.
    pub fn search_by_isbn_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.books.get_mut(isbn)
    }

    /// Look a user up by ID
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Iterate over all books in no particular order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Iterate over all users in no particular order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.users.is_empty()
    }

    /// Drop every book and user
    pub fn clear(&mut self) {
        self.books.clear();
        self.users.clear();
    }

    /// Lend one copy of `isbn` to `user_id`.
    ///
    /// The book's counter is decremented and the ISBN appended to the user's
    /// list together; on any error neither record changes. Borrowing the same
    /// ISBN again takes another copy and appends another entry.
    pub fn borrow_book(&mut self, user_id: &str, isbn: &str) -> Result<(), CheckoutError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| CheckoutError::UserNotFound(user_id.to_string()))?;
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CheckoutError::BookNotFound(isbn.to_string()))?;

        book.borrow()
            .map_err(|_| CheckoutError::NoCopiesAvailable(isbn.to_string()))?;
        user.borrow_book(isbn);
        Ok(())
    }

    /// Take back `isbn` from `user_id`.
    ///
    /// Every entry for the ISBN is removed from the user's list but the
    /// book's counter goes up by exactly one, even when the user held zero or
    /// several entries. Returns the number of entries removed so callers can
    /// spot that mismatch.
    pub fn return_book(&mut self, user_id: &str, isbn: &str) -> Result<usize, CheckoutError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| CheckoutError::UserNotFound(user_id.to_string()))?;
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CheckoutError::BookNotFound(isbn.to_string()))?;

        let removed = user.return_book(isbn);
        book.return_copy();
        Ok(removed)
    }

    /// Replace the whole catalog with the contents of the two files.
    ///
    /// Both files are read before anything is touched, so a file that cannot
    /// be opened leaves the catalog as it was. Malformed lines are skipped.
    pub fn load_from_files(
        &mut self,
        books_path: impl AsRef<Path>,
        users_path: impl AsRef<Path>,
    ) -> LibraryResult<LoadSummary> {
        let books_data = file_io::read_file(books_path.as_ref())?;
        let users_data = file_io::read_file(users_path.as_ref())?;

        let books = codec::parse_books(books_data.as_slice());
        let users = codec::parse_users(users_data.as_slice());

        self.clear();
        let mut summary = LoadSummary {
            skipped: books.skipped + users.skipped,
            ..LoadSummary::default()
        };

        for book in books.records {
            if self.add_book(book) {
                summary.books += 1;
            } else {
                debug!("Skipping repeated ISBN in books file");
                summary.skipped += 1;
            }
        }

        for user in users.records {
            if self.add_user(user) {
                summary.users += 1;
            } else {
                debug!("Skipping repeated user ID in users file");
                summary.skipped += 1;
            }
        }

        info!(
            books = summary.books,
            users = summary.users,
            skipped = summary.skipped,
            "Loaded catalog"
        );

        Ok(summary)
    }

    /// Write every book and every user to their files, one record per line.
    ///
    /// Records are written sorted by key. Neither target is modified if
    /// either file cannot be created.
    pub fn save_to_files(
        &self,
        books_path: impl AsRef<Path>,
        users_path: impl AsRef<Path>,
    ) -> LibraryResult<()> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));

        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));

        let mut books_data = Vec::new();
        codec::write_books(&mut books_data, books)?;

        let mut users_data = Vec::new();
        codec::write_users(&mut users_data, users)?;

        file_io::write_files_atomic(&[
            (books_path.as_ref(), books_data.as_slice()),
            (users_path.as_ref(), users_data.as_slice()),
        ])?;

        info!(
            books = self.books.len(),
            users = self.users.len(),
            "Saved catalog"
        );

        Ok(())
    }
}
