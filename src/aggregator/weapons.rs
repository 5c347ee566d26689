//! Weapon usage breakdown per player.

use super::stats::hs_percentage;
use crate::parser::identity::PlayerKey;
use crate::parser::schema::KillEvent;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kills with one weapon by one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponUsageLine {
    pub player_name: String,
    pub weapon: String,
    pub kills: u32,
    pub headshots: u32,
    pub hs_percentage: f64,
}

/// Kills and headshots per (player, weapon)
///
/// Kills without a weapon tag or without an attacker are left out. When no kill carries one the
/// result is empty. Sorted by player, then kills descending.
pub fn weapon_usage(kills: &[KillEvent]) -> Vec<WeaponUsageLine> {
    let mut cells: BTreeMap<(PlayerKey<'_>, &str), (u32, u32)> = BTreeMap::new();

    for kill in kills {
        let (Some(attacker), Some(weapon)) = (kill.attacker_name.as_deref(), kill.weapon.as_deref())
        else {
            continue;
        };
        let cell = cells
            .entry((PlayerKey::from_name(attacker), weapon))
            .or_default();
        cell.0 += 1;
        if kill.is_headshot {
            cell.1 += 1;
        }
    }

    if cells.is_empty() && !kills.is_empty() {
        debug!("No weapon tags in kill table; weapon usage unavailable");
    }

    let mut lines: Vec<WeaponUsageLine> = cells
        .into_iter()
        .map(|((player, weapon), (kills, headshots))| WeaponUsageLine {
            player_name: player.display_name().to_string(),
            weapon: weapon.to_string(),
            kills,
            headshots,
            hs_percentage: hs_percentage(headshots, kills),
        })
        .collect();

    // Stable sort keeps weapon-name order among equal kill counts
    lines.sort_by(|a, b| {
        a.player_name
            .cmp(&b.player_name)
            .then_with(|| b.kills.cmp(&a.kills))
    });

    lines
}
