//! Rating engine: sub-score normalization, weighted composite and ranking.

pub mod engine;
pub mod tiers;
pub mod weights;

pub use engine::{
    adr_score, band_points, dense_rank, hs_score, kd_score, rate_players, RatedStatLine,
    RatingOutcome,
};
pub use tiers::SkillTier;
pub use weights::{RatingWeights, WeightAnomaly};
