//! Audit log command

use crate::audit::AuditLogger;
use crate::config::LibraryPaths;
use crate::error::LibraryResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(paths: &LibraryPaths, limit: usize) -> LibraryResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
