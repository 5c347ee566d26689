//! Demo Analyzer CLI
//!
//! Turns decoded match events into per-player statistics, multi-kills,
//! trends and ranked composite ratings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use demo_analyzer::commands::{
    display_schema, display_version, execute_analyze, resolve_artifact_path, validate_args,
    validate_report_file, AnalyzeArgs, WeightOverrides,
};
use demo_analyzer::utils::config::DEFAULT_MAX_EVENTS;
use env_logger::Env;
use std::path::PathBuf;

/// Demo Analyzer - match statistics and player ratings
#[derive(Parser, Debug)]
#[command(name = "demo-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a match from decoded event tables
    Analyze {
        /// Decoded event tables (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for JSON report (placed in artifacts/ by default)
        #[arg(short, long, default_value = "artifacts/report.json")]
        output: PathBuf,

        /// Output path for rated stats CSV (placed in artifacts/ by default)
        #[arg(long, default_missing_value = "artifacts/stats.csv", num_args = 0..=1)]
        csv: Option<PathBuf>,

        /// Engine configuration file (TOML)
        #[arg(short, long, env = "DEMO_ANALYZER_CONFIG")]
        config: Option<PathBuf>,

        /// K/D weight in the composite rating
        #[arg(long)]
        kd_weight: Option<f64>,

        /// Headshot weight in the composite rating
        #[arg(long)]
        hs_weight: Option<f64>,

        /// ADR weight in the composite rating
        #[arg(long)]
        adr_weight: Option<f64>,

        /// Multi-kill weight in the composite rating
        #[arg(long)]
        multikill_weight: Option<f64>,

        /// Max tick distance for position correlation
        #[arg(long)]
        tolerance: Option<u32>,

        /// Reject inputs with more events than this
        #[arg(long, default_value_t = DEFAULT_MAX_EVENTS)]
        max_events: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a match report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            csv,
            config,
            kd_weight,
            hs_weight,
            adr_weight,
            multikill_weight,
            tolerance,
            max_events,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                output_json: resolve_artifact_path(output),
                output_csv: csv.map(resolve_artifact_path),
                config_path: config,
                weight_overrides: WeightOverrides {
                    kd: kd_weight,
                    hs: hs_weight,
                    adr: adr_weight,
                    multikill: multikill_weight,
                },
                tolerance,
                max_events,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
