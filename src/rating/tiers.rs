//! Skill tier labels derived from the composite rating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill tier for a composite rating, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    GlobalElite,
    Supreme,
    LegendaryEagle,
    DistinguishedMasterGuardian,
    MasterGuardian,
    GoldNova,
    SilverElite,
    Silver,
}

/// Minimum rating for each tier, checked top-down
const TIER_THRESHOLDS: &[(f64, SkillTier)] = &[
    (90.0, SkillTier::GlobalElite),
    (80.0, SkillTier::Supreme),
    (70.0, SkillTier::LegendaryEagle),
    (60.0, SkillTier::DistinguishedMasterGuardian),
    (50.0, SkillTier::MasterGuardian),
    (40.0, SkillTier::GoldNova),
    (30.0, SkillTier::SilverElite),
];

impl SkillTier {
    /// **Public** - map a 0-100 rating to its tier
    pub fn from_rating(rating: f64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| rating >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(SkillTier::Silver)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillTier::GlobalElite => "Global Elite",
            SkillTier::Supreme => "Supreme",
            SkillTier::LegendaryEagle => "Legendary Eagle",
            SkillTier::DistinguishedMasterGuardian => "Distinguished Master Guardian",
            SkillTier::MasterGuardian => "Master Guardian",
            SkillTier::GoldNova => "Gold Nova",
            SkillTier::SilverElite => "Silver Elite",
            SkillTier::Silver => "Silver",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
