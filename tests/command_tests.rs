use demo_analyzer::commands::{
    build_engine_config, execute_analyze, resolve_artifact_path, validate_args,
    validate_report_file, AnalyzeArgs, WeightOverrides,
};
use demo_analyzer::output::{read_rated_csv, read_report};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/match_events.json");

#[test]
fn test_validate_args_valid() {
    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = AnalyzeArgs::default();
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_zero_max_events() {
    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        max_events: 0,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_infinite_weight() {
    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        weight_overrides: WeightOverrides {
            adr: Some(f64::INFINITY),
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_analyze_writes_outputs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("report.json");
    let csv_path = temp_dir.path().join("stats.csv");

    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        output_json: json_path.clone(),
        output_csv: Some(csv_path.clone()),
        ..Default::default()
    };

    execute_analyze(args).unwrap();

    let report = read_report(&json_path).unwrap();
    assert_eq!(report.source, "match_events.json");
    assert_eq!(report.player_stats.len(), 4);

    let rows = read_rated_csv(&csv_path).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].rank, 1);

    assert!(validate_report_file(&json_path).is_ok());
}

#[test]
fn test_execute_analyze_rejects_oversized_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let json_path = temp_dir.path().join("report.json");

    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        output_json: json_path.clone(),
        max_events: 10,
        ..Default::default()
    };

    assert!(execute_analyze(args).is_err());
    assert!(!json_path.exists());
}

#[test]
fn test_execute_analyze_missing_kill_table() {
    let mut input = NamedTempFile::new().unwrap();
    write!(input, r#"{{"damages": []}}"#).unwrap();
    let temp_dir = tempfile::tempdir().unwrap();

    let args = AnalyzeArgs {
        input: input.path().to_path_buf(),
        output_json: temp_dir.path().join("report.json"),
        ..Default::default()
    };

    let err = execute_analyze(args).unwrap_err();
    assert!(format!("{:#}", err).contains("kills"));
}

#[test]
fn test_config_file_with_overrides() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        "position_tolerance = 16\nadr_cap = 120.0\n\n[weights]\nkd = 0.4\n"
    )
    .unwrap();

    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        config_path: Some(config_file.path().to_path_buf()),
        weight_overrides: WeightOverrides {
            hs: Some(0.1),
            ..Default::default()
        },
        ..Default::default()
    };

    let config = build_engine_config(&args).unwrap();

    assert_eq!(config.position_tolerance, 16);
    assert_eq!(config.adr_cap, 120.0);
    assert_eq!(config.weights.kd, 0.4);
    assert_eq!(config.weights.hs, 0.1);
    assert_eq!(config.weights.adr, 0.30);
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(config_file, "kd_cap = -1.0\n").unwrap();

    let args = AnalyzeArgs {
        input: PathBuf::from(FIXTURE),
        config_path: Some(config_file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(build_engine_config(&args).is_err());
}

#[test]
fn test_resolve_artifact_path() {
    assert_eq!(
        resolve_artifact_path(PathBuf::from("stats.csv")),
        PathBuf::from("artifacts/stats.csv")
    );
}
