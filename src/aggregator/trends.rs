//! Round-by-round breakdown and cumulative performance trends.

use super::rounds::TaggedKill;
use super::stats::kd_ratio;
use crate::parser::identity::PlayerKey;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One player's kills and deaths in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundPlayerLine {
    pub round_index: u32,
    pub player_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
}

/// A round-by-round line extended with running totals for its player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub round_index: u32,
    pub player_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
    pub cumulative_kills: u32,
    pub cumulative_deaths: u32,

    /// Expanding mean of the per-round K/D ratios so far
    pub cumulative_kd: f64,
}

/// Kills and deaths per (round, player)
///
/// A player appears in a round only if they killed or died in it.
/// Sorted by round, then player name.
pub fn round_by_round(kills: &[TaggedKill<'_>]) -> Vec<RoundPlayerLine> {
    // (round, player) -> (kills, deaths)
    let mut cells: BTreeMap<(u32, PlayerKey<'_>), (u32, u32)> = BTreeMap::new();

    for tagged in kills {
        let round = tagged.round_index;
        if let Some(attacker) = tagged.kill.attacker_name.as_deref() {
            cells
                .entry((round, PlayerKey::from_name(attacker)))
                .or_default()
                .0 += 1;
        }
        cells
            .entry((round, PlayerKey::from_name(&tagged.kill.victim_name)))
            .or_default()
            .1 += 1;
    }

    let lines: Vec<RoundPlayerLine> = cells
        .into_iter()
        .map(|((round_index, player), (kills, deaths))| RoundPlayerLine {
            round_index,
            player_name: player.display_name().to_string(),
            kills,
            deaths,
            kd_ratio: kd_ratio(kills, deaths),
        })
        .collect();

    debug!("Built {} round-by-round lines", lines.len());

    lines
}

/// Running totals per player across ascending rounds
///
/// Sorted by player name, then round.
pub fn performance_trends(lines: &[RoundPlayerLine]) -> Vec<TrendPoint> {
    let mut by_player: BTreeMap<&str, Vec<&RoundPlayerLine>> = BTreeMap::new();
    for line in lines {
        by_player.entry(&line.player_name).or_default().push(line);
    }

    let mut points = Vec::with_capacity(lines.len());

    for (_, mut rounds) in by_player {
        rounds.sort_by_key(|l| l.round_index);

        let mut cumulative_kills = 0;
        let mut cumulative_deaths = 0;
        let mut kd_sum = 0.0;

        for (n, line) in rounds.into_iter().enumerate() {
            cumulative_kills += line.kills;
            cumulative_deaths += line.deaths;
            kd_sum += line.kd_ratio;

            points.push(TrendPoint {
                round_index: line.round_index,
                player_name: line.player_name.clone(),
                kills: line.kills,
                deaths: line.deaths,
                kd_ratio: line.kd_ratio,
                cumulative_kills,
                cumulative_deaths,
                cumulative_kd: kd_sum / (n + 1) as f64,
            });
        }
    }

    points
}
