//! Decoded event loading and schema definitions.
//!
//! This module handles:
//! - Loading the decoder's JSON event tables
//! - Normalizing decoder-specific column names
//! - Defining event records and the report schema
//! - Player identity keys

pub mod events;
pub mod identity;
pub mod schema;

// Re-export main types
pub use events::{load_events, parse_events};
pub use identity::PlayerKey;
pub use schema::{
    DamageEvent, KillEvent, MatchEvents, MatchReport, PositionSample, RoundEndEvent, Tick,
};
