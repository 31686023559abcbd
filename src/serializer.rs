//! Serialization module for writing endpoint lists as JSON or YAML.
//!
//! Both formats serialize the same [`EndpointRecord`] model, so absent optional fields are
//! left out in either format.

use crate::error::{Error, Result};
use crate::model::EndpointRecord;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes endpoints to a pretty-printed JSON array.
///
/// An empty slice gives `[]`.
///
/// # Errors
///
/// Returns `Error::Serialization` if serialization fails.
pub fn serialize_json(endpoints: &[EndpointRecord]) -> Result<String> {
    debug!("Serializing {} endpoints to JSON", endpoints.len());
    Ok(serde_json::to_string_pretty(endpoints)?)
}

/// Serializes endpoints to a YAML sequence.
///
/// # Errors
///
/// Returns `Error::Serialization` if serialization fails.
pub fn serialize_yaml(endpoints: &[EndpointRecord]) -> Result<String> {
    debug!("Serializing {} endpoints to YAML", endpoints.len());
    Ok(serde_yaml::to_string(endpoints)?)
}

/// Writes string content to a file.
///
/// Creates the file and any missing parent directories, or overwrites an existing file.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::write(path, content).map_err(|e| Error::io(path, e))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
