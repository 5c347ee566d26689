//! Player identity.
//!
//! The decoded tables carry no stable player id, only display names. Every
//! aggregation keys on [`PlayerKey`] so that a real id source can replace
//! the name lookup here without touching the aggregators.
//!
//! Two players sharing a display name in one match collapse into one key.
//! The input gives no way to tell them apart, so nothing tries to.

use std::borrow::Borrow;
use std::fmt;

/// Join key for one player across all event tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey<'a>(&'a str);

impl<'a> PlayerKey<'a> {
    /// Resolve the key for a player display name
    pub fn from_name(name: &'a str) -> Self {
        Self(name)
    }

    /// Name used in output tables
    pub fn display_name(&self) -> &'a str {
        self.0
    }
}

// Hash and Eq are those of the wrapped str, so maps keyed by PlayerKey
// can be queried with a plain name.
impl Borrow<str> for PlayerKey<'_> {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl fmt::Display for PlayerKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
