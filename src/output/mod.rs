//! Output writers for match reports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON match reports (pretty)
//! - CSV tables of rated stat lines
//! - Coloured terminal summaries

pub mod csv;
pub mod json;
pub mod summary;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use self::csv::{read_rated_csv, write_rated_csv, RatedCsvRow};
pub use json::{read_report, report_to_string, write_report};
pub use summary::render_terminal_summary;

/// Validate an output path and create its parent directories
///
/// **Private** - shared by the JSON and CSV writers
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// File size in bytes, 0 if it cannot be read
fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
