//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Resolves the engine configuration
//! 2. Loads the decoded event tables
//! 3. Runs the engine
//! 4. Writes output files

use super::models::AnalyzeArgs;
use crate::output::{render_terminal_summary, write_rated_csv, write_report};
use crate::parser::load_events;
use crate::pipeline::analyze_match;
use crate::utils::config::{load_config, EngineConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Ok if analysis succeeds, Err with context if any step fails
///
/// # Errors
/// * Config file or override errors
/// * Event loading errors
/// * Missing kill or damage table
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     input: PathBuf::from("match_events.json"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Engine configuration
    info!("Step 1/4: Resolving engine configuration...");
    let config = build_engine_config(&args)?;
    debug!("Engine config: {:?}", config);

    // Step 2: Load events
    info!("Step 2/4: Loading decoded events...");
    let events = load_events(&args.input)
        .with_context(|| format!("Failed to load events from {}", args.input.display()))?;

    let total_events = events.total_events();
    if total_events > args.max_events {
        anyhow::bail!(
            "Input has {} events, above the limit of {} (raise it with --max-events)",
            total_events,
            args.max_events
        );
    }
    debug!("Loaded {} events", total_events);

    // Step 3: Run engine
    info!("Step 3/4: Computing statistics and ratings...");
    let source = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let report = analyze_match(&events, &config, &source).context("Match analysis failed")?;

    info!("{}", report.overview.summary());
    for warning in &report.warnings {
        warn!("{}", warning);
    }

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");

    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if let Some(csv_path) = &args.output_csv {
        write_rated_csv(&report.rated_stats, csv_path).context("Failed to write stats CSV")?;
        info!("✓ Stats CSV written to: {}", csv_path.display());
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
///
/// **Public** - exposed for tests and library callers
pub fn build_engine_config(args: &AnalyzeArgs) -> Result<EngineConfig> {
    let mut config = match &args.config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let overrides = &args.weight_overrides;
    if !overrides.is_empty() {
        debug!("Applying weight overrides: {:?}", overrides);
        overrides.apply(&mut config.weights);
    }

    if let Some(tolerance) = args.tolerance {
        config.position_tolerance = tolerance;
    }

    config.validate().context("Invalid engine configuration")?;

    Ok(config)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output_csv.as_ref() == Some(&args.output_json) {
        anyhow::bail!("CSV and JSON outputs must be different files");
    }

    for (name, value) in args.weight_overrides.given() {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("{} weight must be a non-negative number, got {}", name, value);
        }
    }

    if args.tolerance == Some(0) {
        anyhow::bail!("tolerance must be greater than 0");
    }

    if args.max_events == 0 {
        anyhow::bail!("max_events must be greater than 0");
    }

    Ok(())
}
