//! Utility commands (validate, schema, version) and output path helpers.
//!
//! Relative output paths without a directory land under `artifacts/`.

use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory that bare output file names are placed in
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Place a bare file name under `artifacts/`; paths with a directory are kept
pub fn resolve_artifact_path(path: PathBuf) -> PathBuf {
    let bare = path
        .parent()
        .map(|p| p.as_os_str().is_empty())
        .unwrap_or(true);
    if bare && !path.as_os_str().is_empty() {
        Path::new(ARTIFACTS_DIR).join(path)
    } else {
        path
    }
}

/// Validate a match report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        println!(
            "⚠️  Report schema v{} differs from current v{}",
            report.version, SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Players: {}", report.player_stats.len());
    println!("  Rounds: {}", report.rounds.len());
    println!("  Multi-kills: {}", report.multi_kills.len());
    println!("  Timeline entries: {}", report.timeline.len());
    println!("  Warnings: {}", report.warnings.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Demo Analyzer Match Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Input the report was computed from");
        println!("  config: object             - Engine configuration used");
        println!("  effective_weights: object  - Rating weights after normalization");
        println!("  warnings: array            - Non-fatal anomalies");
        println!("  overview: object           - Match totals and averages");
        println!("  rounds: array              - Round tick intervals");
        println!("  player_stats: array        - Per-player K/D/A, HS%, ADR");
        println!("  rated_stats: array         - Stat lines with sub-scores, rating, rank, tier");
        println!("  multi_kills: array         - Rounds with 2+ kills by one player");
        println!("  round_by_round: array      - Kills and deaths per round and player");
        println!("  trends: array              - Cumulative per-player totals by round");
        println!("  positions: array           - Kill and death locations per player");
        println!("  weapon_usage: array        - Kills and headshots per weapon");
        println!("  timeline: array            - Kills and round ends ordered by tick");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Demo Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-player statistics and ratings from decoded match events.");
}
