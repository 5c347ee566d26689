//! Aggregation of decoded match events into statistics tables.
//!
//! This module transforms the raw event tables into:
//! - Round intervals (the time base for everything per-round)
//! - Per-player stat lines and a match overview
//! - Multi-kill rounds
//! - Kill/death locations
//! - Round-by-round lines and cumulative trends
//! - Weapon usage and a match timeline
//!
//! Every function here is a pure function of its inputs.

pub mod multikill;
pub mod positions;
pub mod rounds;
pub mod stats;
pub mod timeline;
pub mod trends;
pub mod weapons;

// Re-export main types and functions
pub use multikill::{detect_multi_kills, MultiKillEvent, MultiKillKind};
pub use positions::{correlate_all_players, CorrelatedPosition, PlayerPositions, PositionIndex};
pub use rounds::{RoundInterval, RoundTable, TaggedKill};
pub use stats::{aggregate_player_stats, calculate_overview, MatchOverview, PlayerStatLine};
pub use timeline::{build_timeline, TimelineEntry, TimelineEventType};
pub use trends::{performance_trends, round_by_round, RoundPlayerLine, TrendPoint};
pub use weapons::{weapon_usage, WeaponUsageLine};
