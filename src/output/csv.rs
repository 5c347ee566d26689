//! CSV export of rated stat lines.
//!
//! One row per player in rank order. Nested fields are flattened by hand
//! since the csv serializer does not support `#[serde(flatten)]`.

use super::{file_size, prepare_output_path};
use crate::rating::RatedStatLine;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flat CSV record for one rated player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedCsvRow {
    pub rank: u32,
    pub player_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub headshots: u32,
    pub total_damage: u64,
    pub kd_ratio: f64,
    pub hs_percentage: f64,
    pub adr: f64,
    pub kd_score: f64,
    pub hs_score: f64,
    pub adr_score: f64,
    pub multikill_score: f64,
    pub overall_rating: f64,
    pub tier: String,
}

impl From<&RatedStatLine> for RatedCsvRow {
    fn from(line: &RatedStatLine) -> Self {
        Self {
            rank: line.rank,
            player_name: line.stats.player_name.clone(),
            kills: line.stats.kills,
            deaths: line.stats.deaths,
            assists: line.stats.assists,
            headshots: line.stats.headshots,
            total_damage: line.stats.total_damage,
            kd_ratio: line.stats.kd_ratio,
            hs_percentage: line.stats.hs_percentage,
            adr: line.stats.adr,
            kd_score: line.kd_score,
            hs_score: line.hs_score,
            adr_score: line.adr_score,
            multikill_score: line.multikill_score,
            overall_rating: line.overall_rating,
            tier: line.tier.label().to_string(),
        }
    }
}

/// Write rated stat lines as CSV with a header row
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::CsvFailed` - CSV encoding or write error
/// * `OutputError::WriteFailed` - Final flush failed
pub fn write_rated_csv(
    lines: &[RatedStatLine],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let mut writer = ::csv::Writer::from_path(output_path)?;
    for line in lines {
        writer.serialize(RatedCsvRow::from(line))?;
    }
    writer.flush()?;

    info!(
        "CSV written successfully ({} rows, {} bytes)",
        lines.len(),
        file_size(output_path)
    );

    Ok(())
}

/// Read rows back from a CSV written by [`write_rated_csv`]
pub fn read_rated_csv(input_path: impl AsRef<Path>) -> Result<Vec<RatedCsvRow>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading CSV from: {}", input_path.display());

    let mut reader = ::csv::Reader::from_path(input_path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<RatedCsvRow>, _>>()?;

    debug!("Read {} CSV rows", rows.len());

    Ok(rows)
}
