//! Event record and report schema definitions.
//!
//! Event records are produced by the external demo decoder and consumed
//! read-only. [`MatchReport`] is the structure of the JSON files we write
//! to disk; it is versioned to allow future evolution.

use crate::aggregator::{
    MatchOverview, MultiKillEvent, PlayerPositions, PlayerStatLine, RoundInterval,
    RoundPlayerLine, TimelineEntry, TrendPoint, WeaponUsageLine,
};
use crate::rating::{RatedStatLine, RatingWeights};
use crate::utils::config::EngineConfig;
use crate::utils::error::EngineError;
use serde::{Deserialize, Serialize};

/// Simulation timestep, the match's unit of time
pub type Tick = i64;

/// A player death
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub tick: Tick,

    /// `None` for world damage, fall damage and other deaths nobody is credited for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker_name: Option<String>,

    pub victim_name: String,

    /// Not every decoder build reports assists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assister_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,

    #[serde(default)]
    pub is_headshot: bool,
}

/// A single damage instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub tick: Tick,
    pub attacker_name: String,
    pub damage_amount: u32,
}

/// End-of-round marker, one per round in play order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEndEvent {
    pub tick: Tick,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_winner: Option<String>,
}

/// Periodic position sample for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub tick: Tick,
    pub player_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The four decoded event tables of one finished match
///
/// Kills and damage are required for any statistics; a `None` here means
/// the decoder never produced the table. Rounds and positions are optional
/// and simply empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchEvents {
    #[serde(default)]
    pub kills: Option<Vec<KillEvent>>,

    #[serde(default)]
    pub damages: Option<Vec<DamageEvent>>,

    #[serde(default)]
    pub rounds: Vec<RoundEndEvent>,

    #[serde(default)]
    pub positions: Vec<PositionSample>,
}

impl MatchEvents {
    /// Borrow the kill and damage tables, or fail if either is missing
    pub fn core_tables(&self) -> Result<(&[KillEvent], &[DamageEvent]), EngineError> {
        let kills = self
            .kills
            .as_deref()
            .ok_or_else(|| EngineError::MissingPrerequisite("kills".to_string()))?;
        let damages = self
            .damages
            .as_deref()
            .ok_or_else(|| EngineError::MissingPrerequisite("damages".to_string()))?;
        Ok((kills, damages))
    }

    /// Total number of records across all four tables
    pub fn total_events(&self) -> usize {
        self.kills.as_ref().map_or(0, Vec::len)
            + self.damages.as_ref().map_or(0, Vec::len)
            + self.rounds.len()
            + self.positions.len()
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the events came from (input file name or caller label)
    pub source: String,

    /// Configuration the report was computed with
    pub config: EngineConfig,

    /// Weights actually applied after normalization
    pub effective_weights: RatingWeights,

    /// Non-fatal anomalies noticed during the run
    #[serde(default)]
    pub warnings: Vec<String>,

    pub overview: MatchOverview,
    pub rounds: Vec<RoundInterval>,
    pub player_stats: Vec<PlayerStatLine>,

    /// Rated lines, best first
    pub rated_stats: Vec<RatedStatLine>,

    pub multi_kills: Vec<MultiKillEvent>,
    pub round_by_round: Vec<RoundPlayerLine>,
    pub trends: Vec<TrendPoint>,
    pub positions: Vec<PlayerPositions>,
    pub weapon_usage: Vec<WeaponUsageLine>,
    pub timeline: Vec<TimelineEntry>,

    /// Timestamp when report was generated
    pub generated_at: String,
}
