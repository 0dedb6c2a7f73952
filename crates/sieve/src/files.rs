//! Reading inputs and writing artifacts.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use tempfile::NamedTempFile;

use crate::error::SieveError;

/// Read a list or base file into memory.
///
/// # Errors
///
/// Returns [`SieveError::InputUnreadable`] if the file cannot be read.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, SieveError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SieveError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(path:? = path, bytes = source.len(); "Read input");
    Ok(source)
}

/// Write an artifact to `path`.
///
/// The contents go to a temporary file next to `path` which then replaces
/// it, so readers never observe a partially written artifact.
///
/// # Errors
///
/// Returns [`SieveError::OutputUnwritable`] if any step fails.
pub fn write_artifact(path: impl AsRef<Path>, contents: &str) -> Result<(), SieveError> {
    let path = path.as_ref();
    let unwritable = |source| SieveError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file = NamedTempFile::new_in(&dir).map_err(unwritable)?;
    file.write_all(contents.as_bytes()).map_err(unwritable)?;
    file.persist(path).map_err(|err| unwritable(err.error))?;

    debug!(path:? = path, bytes = contents.len(); "Artifact written");
    Ok(())
}
