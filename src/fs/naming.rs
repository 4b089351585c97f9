//! Filename validation and derived paths.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix of files that are still being written.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Accept `name` as a flat file name inside the media directory.
///
/// Media keys are plain ASCII tokens, so anything that could leave the
/// directory or confuse the filesystem is rejected rather than rewritten.
pub fn check_file_name(name: &str) -> Result<&str> {
    if name == "." || name.contains("..") {
        return Err(Error::InvalidFilename(format!("Path traversal in '{}'", name)));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::InvalidFilename(format!("Path separator in '{}'", name)));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::InvalidFilename(format!("Control character in {:?}", name)));
    }
    if name.trim().is_empty() {
        return Err(Error::InvalidFilename("Empty file name".to_string()));
    }

    Ok(name)
}

/// Sibling path used while `path` is being written.
///
/// `img/abc.jpg` becomes `img/abc.jpg.part`.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}
