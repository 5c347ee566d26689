//! Round segmentation.
//!
//! Turns the ordered round-end markers into contiguous tick intervals and
//! answers "which round does this tick belong to".
//!
//! Intervals are left-open: round *i* covers `(end[i-1], end[i]]`. Round 1
//! is closed and starts at tick 0, so every tick up to the first round end
//! belongs to it.

use crate::parser::schema::{KillEvent, RoundEndEvent, Tick};
use log::debug;
use serde::{Deserialize, Serialize};

/// One round's tick range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInterval {
    /// 1-based, contiguous
    pub round_index: u32,
    pub start_tick: Tick,
    pub end_tick: Tick,
}

impl RoundInterval {
    /// Whether `tick` falls inside this round
    pub fn contains(&self, tick: Tick) -> bool {
        let after_start = if self.round_index == 1 {
            tick >= self.start_tick
        } else {
            tick > self.start_tick
        };
        after_start && tick <= self.end_tick
    }
}

/// A kill with its round index resolved
#[derive(Debug, Clone, Copy)]
pub struct TaggedKill<'a> {
    pub kill: &'a KillEvent,
    pub round_index: u32,
}

/// Ordered round intervals for one match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundTable {
    intervals: Vec<RoundInterval>,
}

impl RoundTable {
    /// Build round intervals from round-end markers
    ///
    /// Markers are sorted by tick first, so input order does not matter.
    /// No markers yields an empty table.
    pub fn from_round_ends(round_ends: &[RoundEndEvent]) -> Self {
        let mut end_ticks: Vec<Tick> = round_ends.iter().map(|r| r.tick).collect();
        end_ticks.sort_unstable();

        let mut intervals = Vec::with_capacity(end_ticks.len());
        let mut start_tick: Tick = 0;

        for (i, &end_tick) in end_ticks.iter().enumerate() {
            if i == 0 {
                start_tick = start_tick.min(end_tick);
            }
            intervals.push(RoundInterval {
                round_index: i as u32 + 1,
                start_tick,
                end_tick,
            });
            start_tick = end_tick;
        }

        debug!("Segmented {} rounds", intervals.len());

        Self { intervals }
    }

    pub fn intervals(&self) -> &[RoundInterval] {
        &self.intervals
    }

    /// Number of rounds played
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True when the match has no round context at all
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Round containing `tick`, if any
    pub fn lookup(&self, tick: Tick) -> Option<u32> {
        // First interval that ends at or after the tick
        let idx = self.intervals.partition_point(|iv| iv.end_tick < tick);
        self.intervals
            .get(idx)
            .filter(|iv| iv.contains(tick))
            .map(|iv| iv.round_index)
    }

    /// Round containing `tick`, defaulting to round 1
    ///
    /// Ticks before the first round or after the last one still resolve,
    /// so a boundary glitch never rejects a match.
    pub fn find_round(&self, tick: Tick) -> u32 {
        self.lookup(tick).unwrap_or(1)
    }

    /// Resolve the round of every kill
    ///
    /// Returns `None` when there are no rounds to resolve against.
    pub fn tag_kills<'a>(&self, kills: &'a [KillEvent]) -> Option<Vec<TaggedKill<'a>>> {
        if self.is_empty() {
            return None;
        }

        Some(
            kills
                .iter()
                .map(|kill| TaggedKill {
                    kill,
                    round_index: self.find_round(kill.tick),
                })
                .collect(),
        )
    }
}
