//! Multi-kill detection.
//!
//! Kills are grouped by (attacker, round); any group of two or more kills is
//! one multi-kill round. A player never gets more than one record per round.

use super::rounds::TaggedKill;
use crate::parser::identity::PlayerKey;
use crate::parser::schema::Tick;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification band for a multi-kill round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiKillKind {
    Double,
    Triple,
    Quad,
    Ace,
}

impl MultiKillKind {
    /// Band for a per-round kill count; `None` below two kills
    pub fn from_count(kill_count: u32) -> Option<Self> {
        match kill_count {
            0 | 1 => None,
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Quad),
            _ => Some(Self::Ace),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Double => "2K",
            Self::Triple => "3K",
            Self::Quad => "4K",
            Self::Ace => "ACE",
        }
    }
}

/// Two or more kills by one player in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiKillEvent {
    pub player_name: String,
    pub round_index: u32,
    pub kill_count: u32,
    pub first_kill_tick: Tick,
    pub kind: MultiKillKind,
}

/// Detect multi-kill rounds
///
/// **Public** - main entry point for multi-kill detection
///
/// # Returns
/// Multi-kill records sorted by player, then round
pub fn detect_multi_kills(kills: &[TaggedKill<'_>]) -> Vec<MultiKillEvent> {
    // (player, round) -> (kill count, earliest tick)
    let mut groups: BTreeMap<(PlayerKey<'_>, u32), (u32, Tick)> = BTreeMap::new();

    for tagged in kills {
        let Some(attacker) = tagged.kill.attacker_name.as_deref() else {
            continue;
        };
        let key = (PlayerKey::from_name(attacker), tagged.round_index);
        let group = groups.entry(key).or_insert((0, tagged.kill.tick));
        group.0 += 1;
        group.1 = group.1.min(tagged.kill.tick);
    }

    let events: Vec<MultiKillEvent> = groups
        .into_iter()
        .filter_map(|((player, round_index), (kill_count, first_kill_tick))| {
            MultiKillKind::from_count(kill_count).map(|kind| MultiKillEvent {
                player_name: player.display_name().to_string(),
                round_index,
                kill_count,
                first_kill_tick,
                kind,
            })
        })
        .collect();

    debug!("Detected {} multi-kill rounds", events.len());

    events
}
