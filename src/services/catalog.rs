//! Catalog service
//!
//! Provides the business logic behind every CLI command: input validation,
//! the catalog operation itself, the audit entry, and persisting the result.

use tracing::warn;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::catalog::Catalog;
use crate::config::paths::LibraryPaths;
use crate::config::settings::Settings;
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, User};
use crate::storage::CatalogStore;

/// Which field a search matches against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Title(String),
    Author(String),
    Isbn(String),
}

/// Result of a successful return
#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    pub user: User,
    pub book: Book,
    /// Entries dropped from the user's borrowed list
    pub entries_removed: usize,
}

/// Service for catalog management
pub struct CatalogService {
    store: CatalogStore,
    catalog: Catalog,
    settings: Settings,
    audit: Option<AuditLogger>,
}

impl CatalogService {
    /// Load the catalog named by the paths and settings
    pub fn open(paths: &LibraryPaths, settings: Settings) -> LibraryResult<Self> {
        let store = CatalogStore::from_config(paths, &settings);
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));
        Self::with_store(store, settings, audit)
    }

    /// Load the catalog from an explicit store
    pub fn with_store(
        store: CatalogStore,
        settings: Settings,
        audit: Option<AuditLogger>,
    ) -> LibraryResult<Self> {
        let catalog = store.load()?;
        Ok(Self {
            store,
            catalog,
            settings,
            audit,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Add a new book
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
        quantity: u32,
    ) -> LibraryResult<Book> {
        let book = Book::new(title.trim(), author.trim(), isbn.trim(), quantity);
        book.validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;

        if !self.catalog.add_book(book.clone()) {
            return Err(LibraryError::duplicate_book(book.isbn()));
        }
        self.store.save(&self.catalog)?;

        self.log(AuditEntry::create(
            EntityType::Book,
            book.isbn(),
            Some(book.title().to_string()),
            &book,
        ))?;

        Ok(book)
    }

    /// Remove a book by ISBN
    ///
    /// Users holding the ISBN keep it in their borrowed list.
    pub fn remove_book(&mut self, isbn: &str) -> LibraryResult<Book> {
        let book = self.book(isbn)?.clone();

        let holders = self
            .catalog
            .users()
            .filter(|u| u.has_borrowed(isbn))
            .count();
        if holders > 0 {
            warn!(isbn, holders, "Removing a book that users still have borrowed");
        }

        self.catalog.remove_book(isbn);
        self.store.save(&self.catalog)?;

        self.log(AuditEntry::delete(
            EntityType::Book,
            book.isbn(),
            Some(book.title().to_string()),
            &book,
        ))?;

        Ok(book)
    }

    /// Add a new user, generating an ID when none is given
    pub fn add_user(&mut self, name: &str, id: Option<&str>) -> LibraryResult<User> {
        let id = match id {
            Some(id) => id.trim().to_string(),
            None => self.generate_user_id(),
        };

        let user = User::new(name.trim(), id);
        user.validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;

        if !self.catalog.add_user(user.clone()) {
            return Err(LibraryError::duplicate_user(user.id()));
        }
        self.store.save(&self.catalog)?;

        self.log(AuditEntry::create(
            EntityType::User,
            user.id(),
            Some(user.name().to_string()),
            &user,
        ))?;

        Ok(user)
    }

    /// Remove a user by ID
    pub fn remove_user(&mut self, id: &str) -> LibraryResult<User> {
        let user = self.user(id)?.clone();

        if !user.borrowed_isbns().is_empty() {
            warn!(
                id,
                outstanding = user.borrowed_isbns().len(),
                "Removing a user with books still borrowed"
            );
        }

        self.catalog.remove_user(id);
        self.store.save(&self.catalog)?;

        self.log(AuditEntry::delete(
            EntityType::User,
            user.id(),
            Some(user.name().to_string()),
            &user,
        ))?;

        Ok(user)
    }

    /// Lend a copy of a book to a user
    pub fn borrow(&mut self, user_id: &str, isbn: &str) -> LibraryResult<(User, Book)> {
        let (user_before, book_before) = self.snapshot(user_id, isbn);

        self.catalog.borrow_book(user_id, isbn)?;
        self.store.save(&self.catalog)?;

        let (user, book) = self.current(user_id, isbn)?;
        if let (Some(user_before), Some(book_before)) = (user_before, book_before) {
            self.log(AuditEntry::checkout(
                Operation::Borrow,
                &user_before,
                &user,
                &book_before,
                &book,
            ))?;
        }

        Ok((user, book))
    }

    /// Take a book back from a user
    ///
    /// All of the user's entries for the ISBN are cleared while the stock
    /// goes up by one; a mismatch is logged as a warning.
    pub fn return_book(&mut self, user_id: &str, isbn: &str) -> LibraryResult<ReturnReceipt> {
        let (user_before, book_before) = self.snapshot(user_id, isbn);

        let entries_removed = self.catalog.return_book(user_id, isbn)?;
        if entries_removed != 1 {
            warn!(
                user_id,
                isbn,
                entries_removed,
                "Return restocked one copy but cleared a different number of entries"
            );
        }
        self.store.save(&self.catalog)?;

        let (user, book) = self.current(user_id, isbn)?;
        if let (Some(user_before), Some(book_before)) = (user_before, book_before) {
            self.log(AuditEntry::checkout(
                Operation::Return,
                &user_before,
                &user,
                &book_before,
                &book,
            ))?;
        }

        Ok(ReturnReceipt {
            user,
            book,
            entries_removed,
        })
    }

    /// Find books, sorted by ISBN
    pub fn search(&self, query: &SearchQuery) -> Vec<Book> {
        let mut books = match query {
            SearchQuery::Title(title) => self.catalog.search_by_title(title),
            SearchQuery::Author(author) => self.catalog.search_by_author(author),
            SearchQuery::Isbn(isbn) => self
                .catalog
                .search_by_isbn(isbn)
                .cloned()
                .into_iter()
                .collect(),
        };
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
        books
    }

    /// All books, sorted by title then ISBN
    pub fn list_books(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.catalog.books().collect();
        books.sort_by(|a, b| a.title().cmp(b.title()).then(a.isbn().cmp(b.isbn())));
        books
    }

    /// All users, sorted by ID
    pub fn list_users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.catalog.users().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));
        users
    }

    /// Get a book by ISBN
    pub fn book(&self, isbn: &str) -> LibraryResult<&Book> {
        self.catalog
            .search_by_isbn(isbn)
            .ok_or_else(|| LibraryError::book_not_found(isbn))
    }

    /// Get a user by ID
    pub fn user(&self, id: &str) -> LibraryResult<&User> {
        self.catalog
            .user(id)
            .ok_or_else(|| LibraryError::user_not_found(id))
    }

    /// `<prefix>-<8 hex digits>`, retried until it does not collide
    fn generate_user_id(&self) -> String {
        loop {
            let uuid = Uuid::new_v4().simple().to_string();
            let id = format!("{}-{}", self.settings.user_id_prefix, &uuid[..8]);
            if self.catalog.user(&id).is_none() {
                return id;
            }
        }
    }

    fn snapshot(&self, user_id: &str, isbn: &str) -> (Option<User>, Option<Book>) {
        (
            self.catalog.user(user_id).cloned(),
            self.catalog.search_by_isbn(isbn).cloned(),
        )
    }

    fn current(&self, user_id: &str, isbn: &str) -> LibraryResult<(User, Book)> {
        Ok((self.user(user_id)?.clone(), self.book(isbn)?.clone()))
    }

    fn log(&self, entry: AuditEntry) -> LibraryResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_service() -> (TempDir, CatalogService) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let service = CatalogService::open(&paths, Settings::default()).unwrap();
        (temp_dir, service)
    }

    fn reopen(temp_dir: &TempDir) -> CatalogService {
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        CatalogService::open(&paths, Settings::default()).unwrap()
    }

    fn audit_log(temp_dir: &TempDir) -> AuditLogger {
        AuditLogger::new(temp_dir.path().join("audit.log"))
    }

    #[test]
    fn test_add_book_persists() {
        let (temp_dir, mut service) = create_test_service();

        let book = service.add_book(" Dune ", "Frank Herbert", "B001", 5).unwrap();
        assert_eq!(book.title(), "Dune");

        let reopened = reopen(&temp_dir);
        assert_eq!(reopened.book("B001").unwrap().quantity(), 5);
    }

    #[test]
    fn test_add_duplicate_book() {
        let (_temp_dir, mut service) = create_test_service();

        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();
        let err = service.add_book("Dune", "Frank Herbert", "B001", 9).unwrap_err();

        assert!(matches!(err, LibraryError::Duplicate { .. }));
        assert_eq!(service.book("B001").unwrap().quantity(), 5);
    }

    #[test]
    fn test_add_book_validation() {
        let (_temp_dir, mut service) = create_test_service();

        let err = service.add_book("Dune; Part One", "Frank Herbert", "B001", 5).unwrap_err();
        assert!(err.is_validation());

        let err = service.add_book("Dune", "Frank Herbert", "  ", 5).unwrap_err();
        assert!(err.is_validation());
        assert!(service.catalog().is_empty());
    }

    #[test]
    fn test_add_user_generates_id() {
        let (_temp_dir, mut service) = create_test_service();

        let user = service.add_user("Alice", None).unwrap();
        assert!(user.id().starts_with("U-"));
        assert_eq!(user.id().len(), 10);

        let explicit = service.add_user("Bob", Some("U001")).unwrap();
        assert_eq!(explicit.id(), "U001");

        let err = service.add_user("Robert", Some("U001")).unwrap_err();
        assert!(matches!(err, LibraryError::Duplicate { .. }));
    }

    #[test]
    fn test_remove_missing_entities() {
        let (_temp_dir, mut service) = create_test_service();

        assert!(service.remove_book("B404").unwrap_err().is_not_found());
        assert!(service.remove_user("U404").unwrap_err().is_not_found());
    }

    #[test]
    fn test_borrow_and_return_persist() {
        let (temp_dir, mut service) = create_test_service();
        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();
        service.add_user("Alice", Some("U001")).unwrap();

        let (user, book) = service.borrow("U001", "B001").unwrap();
        assert_eq!(book.quantity(), 4);
        assert_eq!(user.borrowed_isbns(), ["B001"]);

        let reopened = reopen(&temp_dir);
        assert_eq!(reopened.book("B001").unwrap().quantity(), 4);
        assert_eq!(reopened.user("U001").unwrap().borrowed_isbns(), ["B001"]);

        let receipt = service.return_book("U001", "B001").unwrap();
        assert_eq!(receipt.entries_removed, 1);
        assert_eq!(receipt.book.quantity(), 5);
        assert!(receipt.user.borrowed_isbns().is_empty());
    }

    #[test]
    fn test_borrow_reasons() {
        let (_temp_dir, mut service) = create_test_service();
        service.add_book("Solo Copy", "Someone", "B001", 1).unwrap();
        service.add_user("Tom", Some("U100")).unwrap();

        service.borrow("U100", "B001").unwrap();

        let err = service.borrow("U100", "B001").unwrap_err();
        assert!(matches!(err, LibraryError::Unavailable { .. }));

        let err = service.borrow("U404", "B001").unwrap_err();
        assert_eq!(err.to_string(), "User not found: U404");

        let err = service.return_book("U100", "B404").unwrap_err();
        assert_eq!(err.to_string(), "Book not found: B404");
    }

    #[test]
    fn test_search() {
        let (_temp_dir, mut service) = create_test_service();
        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();
        service.add_book("Dune Messiah", "Frank Herbert", "B002", 2).unwrap();
        service.add_book("Foundation", "Isaac Asimov", "B003", 3).unwrap();

        let by_author = service.search(&SearchQuery::Author("Frank Herbert".into()));
        let isbns: Vec<&str> = by_author.iter().map(|b| b.isbn()).collect();
        assert_eq!(isbns, ["B001", "B002"]);

        assert_eq!(service.search(&SearchQuery::Title("Dune".into())).len(), 1);
        assert_eq!(service.search(&SearchQuery::Isbn("B003".into())).len(), 1);
        assert!(service.search(&SearchQuery::Title("Emma".into())).is_empty());
    }

    #[test]
    fn test_listing_order() {
        let (_temp_dir, mut service) = create_test_service();
        service.add_book("Foundation", "Isaac Asimov", "B003", 3).unwrap();
        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();
        service.add_user("Bob", Some("U002")).unwrap();
        service.add_user("Alice", Some("U001")).unwrap();

        let titles: Vec<&str> = service.list_books().iter().map(|b| b.title()).collect();
        assert_eq!(titles, ["Dune", "Foundation"]);

        let ids: Vec<&str> = service.list_users().iter().map(|u| u.id()).collect();
        assert_eq!(ids, ["U001", "U002"]);
    }

    #[test]
    fn test_mutations_are_audited() {
        let (temp_dir, mut service) = create_test_service();
        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();
        service.add_user("Alice", Some("U001")).unwrap();
        service.borrow("U001", "B001").unwrap();
        service.return_book("U001", "B001").unwrap();
        service.remove_user("U001").unwrap();

        let entries = audit_log(&temp_dir).read_all().unwrap();
        let operations: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            [
                Operation::Create,
                Operation::Create,
                Operation::Borrow,
                Operation::Return,
                Operation::Delete
            ]
        );
        assert_eq!(
            entries[2].diff_summary.as_deref(),
            Some("borrowed_isbns: [] -> [B001], quantity: 5 -> 4")
        );
    }

    #[test]
    fn test_failed_operations_not_audited() {
        let (temp_dir, mut service) = create_test_service();
        service.add_book("Solo Copy", "Someone", "B001", 0).unwrap();
        service.add_user("Tom", Some("U100")).unwrap();

        assert!(service.borrow("U100", "B001").is_err());
        assert_eq!(audit_log(&temp_dir).entry_count().unwrap(), 2);
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };

        let mut service = CatalogService::open(&paths, settings).unwrap();
        service.add_book("Dune", "Frank Herbert", "B001", 5).unwrap();

        assert!(!paths.audit_log().exists());
    }
}
