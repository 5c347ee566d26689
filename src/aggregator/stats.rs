//! Per-player statistics from kill and damage tables.
//!
//! Kills, headshots, deaths, assists and damage are grouped per player
//! independently and combined over the union of player names. A player who
//! only ever died still gets a line, with zero offensive stats.

use crate::parser::identity::PlayerKey;
use crate::parser::schema::{DamageEvent, KillEvent};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated statistics for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub headshots: u32,
    pub total_damage: u64,
    pub kd_ratio: f64,
    pub hs_percentage: f64,
    pub adr: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    kills: u32,
    deaths: u32,
    assists: u32,
    headshots: u32,
    damage: u64,
}

/// Kills over deaths; with no deaths the ratio is the kill count itself
pub fn kd_ratio(kills: u32, deaths: u32) -> f64 {
    if deaths > 0 {
        kills as f64 / deaths as f64
    } else {
        kills as f64
    }
}

/// Share of kills that were headshots, 0-100. Zero kills gives 0.
pub fn hs_percentage(headshots: u32, kills: u32) -> f64 {
    if kills > 0 {
        headshots as f64 / kills as f64 * 100.0
    } else {
        0.0
    }
}

/// Average damage per round, guarded against zero-round matches
pub fn average_damage_per_round(total_damage: u64, total_rounds: usize) -> f64 {
    total_damage as f64 / total_rounds.max(1) as f64
}

/// Aggregate one stat line per player seen as attacker, victim or assister
///
/// **Public** - main entry point for statistics
///
/// # Arguments
/// * `kills` - Kill table
/// * `damages` - Damage table
/// * `total_rounds` - Rounds played, used for ADR
///
/// # Returns
/// Stat lines sorted by player name
pub fn aggregate_player_stats(
    kills: &[KillEvent],
    damages: &[DamageEvent],
    total_rounds: usize,
) -> Vec<PlayerStatLine> {
    debug!(
        "Aggregating stats from {} kills and {} damage events over {} rounds",
        kills.len(),
        damages.len(),
        total_rounds
    );

    let mut tallies: BTreeMap<PlayerKey<'_>, Tally> = BTreeMap::new();

    for kill in kills {
        if let Some(name) = kill.attacker_name.as_deref() {
            let attacker = tallies.entry(PlayerKey::from_name(name)).or_default();
            attacker.kills += 1;
            if kill.is_headshot {
                attacker.headshots += 1;
            }
        }

        tallies
            .entry(PlayerKey::from_name(&kill.victim_name))
            .or_default()
            .deaths += 1;

        if let Some(assister) = &kill.assister_name {
            tallies
                .entry(PlayerKey::from_name(assister))
                .or_default()
                .assists += 1;
        }
    }

    for damage in damages {
        tallies
            .entry(PlayerKey::from_name(&damage.attacker_name))
            .or_default()
            .damage += u64::from(damage.damage_amount);
    }

    let lines: Vec<PlayerStatLine> = tallies
        .into_iter()
        .map(|(player, t)| PlayerStatLine {
            player_name: player.display_name().to_string(),
            kills: t.kills,
            deaths: t.deaths,
            assists: t.assists,
            headshots: t.headshots,
            total_damage: t.damage,
            kd_ratio: kd_ratio(t.kills, t.deaths),
            hs_percentage: hs_percentage(t.headshots, t.kills),
            adr: average_damage_per_round(t.damage, total_rounds),
        })
        .collect();

    debug!("Aggregated stats for {} players", lines.len());

    lines
}

/// Match-wide totals and averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOverview {
    pub player_count: usize,
    pub rounds_played: usize,
    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_damage: u64,

    /// Mean of per-player ADR
    pub mean_adr: f64,

    /// Mean of per-player HS%
    pub mean_hs_percentage: f64,
}

impl MatchOverview {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Players: {} | Rounds: {} | Kills: {} | Deaths: {} | Avg ADR: {:.1} | Avg HS: {:.1}%",
            self.player_count,
            self.rounds_played,
            self.total_kills,
            self.total_deaths,
            self.mean_adr,
            self.mean_hs_percentage
        )
    }
}

/// Summarize the stat table for the whole match
pub fn calculate_overview(stats: &[PlayerStatLine], rounds_played: usize) -> MatchOverview {
    if stats.is_empty() {
        return MatchOverview {
            rounds_played,
            ..Default::default()
        };
    }

    let count = stats.len() as f64;

    MatchOverview {
        player_count: stats.len(),
        rounds_played,
        total_kills: stats.iter().map(|s| u64::from(s.kills)).sum(),
        total_deaths: stats.iter().map(|s| u64::from(s.deaths)).sum(),
        total_damage: stats.iter().map(|s| s.total_damage).sum(),
        mean_adr: stats.iter().map(|s| s.adr).sum::<f64>() / count,
        mean_hs_percentage: stats.iter().map(|s| s.hs_percentage).sum::<f64>() / count,
    }
}
