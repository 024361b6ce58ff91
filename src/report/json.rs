//! JSON report writer.
//!
//! Writes report documents to disk with pretty formatting, creating
//! parent directories as needed.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::utils::error::ReportError;

/// Write a report document to a JSON file.
///
/// # Errors
/// * `ReportError::WriteFailed` - I/O error during write
/// * `ReportError::SerializationFailed` - JSON serialization error
/// * `ReportError::InvalidPath` - path cannot be created or is invalid
pub fn write_json<T: Serialize>(report: &T, output_path: impl AsRef<Path>) -> Result<(), ReportError> {
    let output_path = output_path.as_ref();

    info!("writing report to {}", output_path.display());
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                ReportError::InvalidPath(format!("cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(ReportError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report).map_err(ReportError::SerializationFailed)?;

    Ok(())
}

/// Serialize a report document to a pretty-printed JSON string.
pub fn to_json_string<T: Serialize>(report: &T) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(ReportError::SerializationFailed)
}

fn validate_output_path(path: &Path) -> Result<(), ReportError> {
    if path.as_os_str().is_empty() {
        return Err(ReportError::InvalidPath("empty path".to_string()));
    }
    if path.is_dir() {
        return Err(ReportError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_rejected() {
        let err = write_json(&serde_json::json!({}), "");
        assert!(matches!(err, Err(ReportError::InvalidPath(_))));
    }
}
