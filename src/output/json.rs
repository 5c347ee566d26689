//! JSON match report writer.
//!
//! Writes MatchReport structs to JSON files with proper formatting.

use super::{file_size, prepare_output_path};
use crate::parser::schema::MatchReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a match report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = analyze_match(&events, &config, "match.json")?;
/// write_report(&report, "artifacts/report.json")?;
/// ```
pub fn write_report(report: &MatchReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    info!(
        "Report written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &MatchReport) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Read a match report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<MatchReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)?;
    let report: MatchReport = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Report loaded: version {}, {} players",
        report.version,
        report.player_stats.len()
    );

    Ok(report)
}
