//! Path management for the library catalog
//!
//! ## Path Resolution Order
//!
//! 1. `LIBRARY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `library-cli`
//!    (`$XDG_CONFIG_HOME` or `~/.config` on Linux, `~/Library/Application Support`
//!    on macOS, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::LibraryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LIBRARY_CLI_DATA_DIR";

const APP_DIR_NAME: &str = "library-cli";

/// Manages all paths used by the catalog CLI
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    /// Base directory for all catalog data
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Create a new LibraryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, LibraryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LibraryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to books.txt
    pub fn books_file(&self) -> PathBuf {
        self.data_dir().join("books.txt")
    }

    /// Get the path to users.txt
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.txt")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LibraryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the catalog has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LibraryError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| LibraryError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}
