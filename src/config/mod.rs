//! Configuration module for the library catalog
//!
//! This module provides configuration management including:
//! - Platform path resolution for the data and config files
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LibraryPaths;
pub use settings::Settings;
