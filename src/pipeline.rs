//! One-shot batch pipeline from decoded events to a match report.
//!
//! Stages:
//! 1. Segment rounds
//! 2. Aggregate per-player stats and the overview
//! 3. Detect multi-kills
//! 4. Correlate positions
//! 5. Compose round-by-round lines and trends
//! 6. Rate and rank
//!
//! Nothing here keeps state between calls; the same events and
//! configuration always give the same report, apart from `generated_at`.

use crate::aggregator::{
    aggregate_player_stats, build_timeline, calculate_overview, correlate_all_players,
    detect_multi_kills, performance_trends, round_by_round, weapon_usage, RoundTable,
};
use crate::parser::schema::{MatchEvents, MatchReport};
use crate::rating::rate_players;
use crate::utils::config::{EngineConfig, SCHEMA_VERSION};
use crate::utils::error::EngineError;
use chrono::Utc;
use log::{debug, warn};

/// Analyze one finished match
///
/// **Public** - main entry point of the engine
///
/// # Arguments
/// * `events` - The decoded event tables
/// * `config` - Weights, tolerance and normalization caps
/// * `source` - Label recorded in the report (usually the input file name)
///
/// # Returns
/// The full match report
///
/// # Errors
/// * `EngineError::InvalidConfig` - configuration failed validation
/// * `EngineError::MissingPrerequisite` - kill or damage table is absent
///
/// # Example
/// ```ignore
/// let events = load_events("match_events.json")?;
/// let report = analyze_match(&events, &EngineConfig::default(), "match_events.json")?;
/// println!("{}", report.overview.summary());
/// ```
pub fn analyze_match(
    events: &MatchEvents,
    config: &EngineConfig,
    source: &str,
) -> Result<MatchReport, EngineError> {
    config.validate()?;
    let (kills, damages) = events.core_tables()?;

    debug!(
        "Analyzing {} kills, {} damage events, {} round ends, {} position samples",
        kills.len(),
        damages.len(),
        events.rounds.len(),
        events.positions.len()
    );

    let mut warnings = Vec::new();

    let rounds = RoundTable::from_round_ends(&events.rounds);
    let tagged = rounds.tag_kills(kills);
    if tagged.is_none() {
        warn!("No round end markers; per-round outputs will be empty");
        warnings.push("No round end markers; per-round outputs are empty".to_string());
    }
    let tagged = tagged.unwrap_or_default();

    let player_stats = aggregate_player_stats(kills, damages, rounds.len());
    let overview = calculate_overview(&player_stats, rounds.len());
    debug!("Overview: {}", overview.summary());

    let multi_kills = detect_multi_kills(&tagged);

    let positions = correlate_all_players(kills, &events.positions, config.position_tolerance);

    let round_lines = round_by_round(&tagged);
    let trends = performance_trends(&round_lines);

    let weapons = weapon_usage(kills);
    let timeline = build_timeline(kills, &events.rounds, &rounds);

    let rating = rate_players(&player_stats, &multi_kills, config);
    if let Some(anomaly) = rating.anomaly {
        warnings.push(anomaly.to_string());
    }

    Ok(MatchReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        config: config.clone(),
        effective_weights: rating.effective_weights,
        warnings,
        overview,
        rounds: rounds.intervals().to_vec(),
        player_stats,
        rated_stats: rating.lines,
        multi_kills,
        round_by_round: round_lines,
        trends,
        positions,
        weapon_usage: weapons,
        timeline,
        generated_at: Utc::now().to_rfc3339(),
    })
}
