//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::LibraryError;

/// Read a whole file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>, LibraryError> {
    fs::read(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read file");
        LibraryError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, LibraryError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LibraryError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| LibraryError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LibraryError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let contents = serde_json::to_vec_pretty(data)
        .map_err(|e| LibraryError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_files_atomic(&[(path.as_ref(), contents.as_slice())])
}

/// Replace several files with new contents.
///
/// Every file is first written to a temporary sibling and synced. Only when
/// all of them are staged are they renamed over their targets, so a target
/// that cannot be created leaves every file as it was.
pub fn write_files_atomic(files: &[(&Path, &[u8])]) -> Result<(), LibraryError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for &(path, data) in files {
        match stage(path, data) {
            Ok(temp_path) => staged.push((temp_path, path)),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }

    for (i, (temp_path, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(temp_path, path) {
            discard(&staged[i..]);
            warn!(path = %path.display(), error = %e, "Failed to replace file");
            return Err(LibraryError::Storage(format!(
                "Failed to rename temp file for {}: {}",
                path.display(),
                e
            )));
        }
    }

    Ok(())
}

/// Write `data` to the temporary sibling of `path` and return its location
fn stage(path: &Path, data: &[u8]) -> Result<PathBuf, LibraryError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            warn!(path = %parent.display(), error = %e, "Failed to create directory");
            LibraryError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;

    let file = File::create(&temp_path).map_err(|e| {
        warn!(path = %temp_path.display(), error = %e, "Failed to create temp file");
        LibraryError::Storage(format!("Failed to create temp file: {}", e))
    })?;

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(LibraryError::Storage(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    Ok(temp_path)
}

/// `books.txt` -> `books.txt.tmp`, in the same directory so rename stays atomic
fn temp_path_for(path: &Path) -> Result<PathBuf, LibraryError> {
    let file_name = path.file_name().ok_or_else(|| {
        LibraryError::Storage(format!("Not a file path: {}", path.display()))
    })?;

    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp_path, _) in staged {
        let _ = fs::remove_file(temp_path);
    }
}
