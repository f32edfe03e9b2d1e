//! Service layer for the library catalog
//!
//! The service layer provides business logic on top of the catalog and its
//! storage, handling validation, audit logging and persistence.

pub mod catalog;

pub use catalog::{CatalogService, ReturnReceipt, SearchQuery};
