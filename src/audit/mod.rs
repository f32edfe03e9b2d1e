//! Audit logging for the library catalog
//!
//! Records every catalog mutation (books and users added or removed, copies
//! borrowed and returned) in an append-only JSON-lines file.
//!
//! - `AuditEntry`: one operation with timestamp, entity, and optional
//!   before/after snapshots.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: summarizes which top-level fields changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
