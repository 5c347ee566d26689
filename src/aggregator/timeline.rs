//! Chronological match timeline.

use super::rounds::RoundTable;
use crate::parser::schema::{KillEvent, RoundEndEvent, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    Kill,
    RoundEnd,
}

/// One entry of the match timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub tick: Tick,

    /// `None` when the match has no round context
    pub round_index: Option<u32>,

    pub event_type: TimelineEventType,
    pub description: String,
}

/// Round ends and kills ordered by tick
///
/// Entries on the same tick keep kills before the round end they closed.
pub fn build_timeline(
    kills: &[KillEvent],
    round_ends: &[RoundEndEvent],
    rounds: &RoundTable,
) -> Vec<TimelineEntry> {
    let round_of = |tick: Tick| (!rounds.is_empty()).then(|| rounds.find_round(tick));

    let mut entries: Vec<TimelineEntry> = kills
        .iter()
        .map(|kill| TimelineEntry {
            tick: kill.tick,
            round_index: round_of(kill.tick),
            event_type: TimelineEventType::Kill,
            description: describe_kill(kill),
        })
        .collect();

    let mut ends: Vec<&RoundEndEvent> = round_ends.iter().collect();
    ends.sort_by_key(|r| r.tick);

    for (i, end) in ends.into_iter().enumerate() {
        let round = i as u32 + 1;
        let description = match &end.round_winner {
            Some(winner) => format!("Round {} won by {}", round, winner),
            None => format!("Round {} ended", round),
        };
        entries.push(TimelineEntry {
            tick: end.tick,
            round_index: Some(round),
            event_type: TimelineEventType::RoundEnd,
            description,
        });
    }

    entries.sort_by_key(|e| (e.tick, e.event_type == TimelineEventType::RoundEnd));
    entries
}

fn describe_kill(kill: &KillEvent) -> String {
    let mut text = match &kill.attacker_name {
        Some(attacker) => format!("{} killed {}", attacker, kill.victim_name),
        None => format!("{} died", kill.victim_name),
    };
    if let Some(weapon) = &kill.weapon {
        text.push_str(&format!(" with {}", weapon));
    }
    if kill.is_headshot {
        text.push_str(" (headshot)");
    }
    text
}
