//! Kill/death position correlation.
//!
//! Maps a player's kill or death ticks to the nearest position sample *of
//! that same player*, accepting the match only within a tick tolerance.
//! Samples are indexed per player and sorted by tick, so each lookup is a
//! binary search.

use crate::parser::identity::PlayerKey;
use crate::parser::schema::{KillEvent, PositionSample, Tick};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An event tick matched to a position sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedPosition {
    pub event_tick: Tick,
    pub sample_tick: Tick,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Kill and death locations for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPositions {
    pub player_name: String,
    pub kill_positions: Vec<CorrelatedPosition>,
    pub death_positions: Vec<CorrelatedPosition>,
}

/// Position samples grouped per player, sorted by tick
#[derive(Debug, Default)]
pub struct PositionIndex<'a> {
    by_player: HashMap<PlayerKey<'a>, Vec<&'a PositionSample>>,
}

impl<'a> PositionIndex<'a> {
    /// Index a sample series covering any number of players
    pub fn build(samples: &'a [PositionSample]) -> Self {
        let mut by_player: HashMap<PlayerKey<'a>, Vec<&'a PositionSample>> = HashMap::new();

        for sample in samples {
            by_player
                .entry(PlayerKey::from_name(&sample.player_name))
                .or_default()
                .push(sample);
        }

        for series in by_player.values_mut() {
            series.sort_by_key(|s| s.tick);
        }

        debug!(
            "Indexed {} position samples for {} players",
            samples.len(),
            by_player.len()
        );

        Self { by_player }
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }

    /// Sample of `player` closest in time to `tick`
    ///
    /// On an exact tie the earlier sample wins.
    pub fn nearest(&self, player: &str, tick: Tick) -> Option<&'a PositionSample> {
        let series = self.by_player.get(player)?;
        let idx = series.partition_point(|s| s.tick < tick);

        let before = idx.checked_sub(1).and_then(|i| series.get(i));
        let after = series.get(idx);

        match (before, after) {
            (Some(b), Some(a)) => {
                if tick.abs_diff(a.tick) < tick.abs_diff(b.tick) {
                    Some(*a)
                } else {
                    Some(*b)
                }
            }
            (Some(b), None) => Some(*b),
            (None, Some(a)) => Some(*a),
            (None, None) => None,
        }
    }

    /// Locate each event tick for `player`
    ///
    /// Ticks with no sample within `tolerance` are dropped.
    pub fn correlate(
        &self,
        player: &str,
        event_ticks: &[Tick],
        tolerance: u32,
    ) -> Vec<CorrelatedPosition> {
        event_ticks
            .iter()
            .filter_map(|&event_tick| {
                let sample = self.nearest(player, event_tick)?;
                (event_tick.abs_diff(sample.tick) <= u64::from(tolerance)).then(|| {
                    CorrelatedPosition {
                        event_tick,
                        sample_tick: sample.tick,
                        x: sample.x,
                        y: sample.y,
                        z: sample.z,
                    }
                })
            })
            .collect()
    }
}

/// A player's kill ticks and death ticks, in kill-table order
#[derive(Debug, Default)]
struct EventTicks {
    kills: Vec<Tick>,
    deaths: Vec<Tick>,
}

/// Group kill and death ticks by player in one pass over the kill table
///
/// Uncredited deaths only add a death tick for the victim.
fn group_event_ticks(kills: &[KillEvent]) -> BTreeMap<PlayerKey<'_>, EventTicks> {
    let mut groups: BTreeMap<PlayerKey<'_>, EventTicks> = BTreeMap::new();

    for kill in kills {
        if let Some(attacker) = kill.attacker_name.as_deref() {
            groups
                .entry(PlayerKey::from_name(attacker))
                .or_default()
                .kills
                .push(kill.tick);
        }
        groups
            .entry(PlayerKey::from_name(&kill.victim_name))
            .or_default()
            .deaths
            .push(kill.tick);
    }

    groups
}

/// Correlate kill and death locations for every player in the kill table
///
/// Returns an empty list when there are no position samples.
pub fn correlate_all_players(
    kills: &[KillEvent],
    samples: &[PositionSample],
    tolerance: u32,
) -> Vec<PlayerPositions> {
    if samples.is_empty() {
        debug!("No position samples; skipping position correlation");
        return Vec::new();
    }

    let index = PositionIndex::build(samples);

    group_event_ticks(kills)
        .into_iter()
        .map(|(player, ticks)| {
            let name = player.display_name();
            PlayerPositions {
                player_name: name.to_string(),
                kill_positions: index.correlate(name, &ticks.kills, tolerance),
                death_positions: index.correlate(name, &ticks.deaths, tolerance),
            }
        })
        .collect()
}
