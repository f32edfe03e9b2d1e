//! User settings for the library catalog
//!
//! Manages preferences such as audit logging, the prefix used for generated
//! user IDs, and optional overrides for where the catalog files live.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LibraryPaths;
use crate::error::LibraryError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for the catalog CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether catalog mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Prefix for user IDs generated when none is supplied
    #[serde(default = "default_user_id_prefix")]
    pub user_id_prefix: String,

    /// Books file location, if not the default under the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books_file: Option<PathBuf>,

    /// Users file location, if not the default under the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<PathBuf>,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_user_id_prefix() -> String {
    "U".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audit_enabled: default_audit_enabled(),
            user_id_prefix: default_user_id_prefix(),
            books_file: None,
            users_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &LibraryPaths) -> Result<Self, LibraryError> {
        read_json(paths.settings_file()).map_err(|e| {
            LibraryError::Config(format!("Failed to load settings file: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LibraryPaths) -> Result<(), LibraryError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
