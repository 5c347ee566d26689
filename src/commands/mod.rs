//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{build_engine_config, execute_analyze, validate_args};
pub use models::{AnalyzeArgs, WeightOverrides};
pub use utils::{display_schema, display_version, resolve_artifact_path, validate_report_file};
