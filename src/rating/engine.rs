//! Composite performance rating and dense ranking.
//!
//! Four sub-scores are each brought onto a 0-100 scale, combined with the
//! normalized weight vector, and ranked descending.

use super::tiers::SkillTier;
use super::weights::{RatingWeights, WeightAnomaly};
use crate::aggregator::{MultiKillEvent, PlayerStatLine};
use crate::utils::config::{EngineConfig, MULTIKILL_BAND_POINTS, MULTIKILL_SCORE_CAP};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stat line extended with sub-scores, composite rating and rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedStatLine {
    #[serde(flatten)]
    pub stats: PlayerStatLine,

    pub kd_score: f64,
    pub hs_score: f64,
    pub adr_score: f64,
    pub multikill_score: f64,
    pub overall_rating: f64,

    /// Dense rank, 1 is best
    pub rank: u32,

    pub tier: SkillTier,
}

/// Result of a rating pass
#[derive(Debug, Clone, PartialEq)]
pub struct RatingOutcome {
    /// Rated lines sorted by rank, then player name
    pub lines: Vec<RatedStatLine>,

    /// Weights actually applied
    pub effective_weights: RatingWeights,

    /// Set when the configured weights had to be corrected
    pub anomaly: Option<WeightAnomaly>,
}

/// Value clamped into [0, cap] and scaled to 0-100
fn capped_score(value: f64, cap: f64) -> f64 {
    if !(cap.is_finite() && cap > 0.0) || value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(cap) / cap * 100.0
}

pub fn kd_score(kd_ratio: f64, kd_cap: f64) -> f64 {
    capped_score(kd_ratio, kd_cap)
}

pub fn hs_score(hs_percentage: f64) -> f64 {
    capped_score(hs_percentage, 100.0)
}

pub fn adr_score(adr: f64, adr_cap: f64) -> f64 {
    capped_score(adr, adr_cap)
}

/// Points for one multi-kill round; counts below two are worth nothing
pub fn band_points(kill_count: u32) -> f64 {
    MULTIKILL_BAND_POINTS
        .iter()
        .find(|(min_kills, _)| kill_count >= *min_kills)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// Summed band points per player, capped
fn multikill_scores(multi_kills: &[MultiKillEvent]) -> HashMap<&str, f64> {
    let mut scores: HashMap<&str, f64> = HashMap::new();
    for event in multi_kills {
        *scores.entry(event.player_name.as_str()).or_default() += band_points(event.kill_count);
    }
    for score in scores.values_mut() {
        *score = score.min(MULTIKILL_SCORE_CAP);
    }
    scores
}

/// Dense ranks for a list of ratings, highest first
///
/// Equal ratings share a rank and the next lower distinct rating gets the
/// following integer. The returned vector is parallel to `ratings`.
pub fn dense_rank(ratings: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..ratings.len()).collect();
    order.sort_by(|&a, &b| ratings[b].total_cmp(&ratings[a]));

    let mut ranks = vec![0; ratings.len()];
    let mut rank = 0;
    let mut previous: Option<f64> = None;

    for idx in order {
        let rating = ratings[idx];
        if previous != Some(rating) {
            rank += 1;
            previous = Some(rating);
        }
        ranks[idx] = rank;
    }

    ranks
}

/// Rate and rank every player
///
/// **Public** - main entry point for the rating engine
///
/// # Arguments
/// * `stats` - Per-player stat lines
/// * `multi_kills` - Multi-kill records for the same match
/// * `config` - Caps and weight vector
///
/// # Returns
/// Rated lines plus the weights used and any weight correction applied
pub fn rate_players(
    stats: &[PlayerStatLine],
    multi_kills: &[MultiKillEvent],
    config: &EngineConfig,
) -> RatingOutcome {
    let (weights, anomaly) = config.weights.normalized();
    let mk_scores = multikill_scores(multi_kills);

    let mut lines: Vec<RatedStatLine> = stats
        .iter()
        .map(|line| {
            let kd = kd_score(line.kd_ratio, config.kd_cap);
            let hs = hs_score(line.hs_percentage);
            let adr = adr_score(line.adr, config.adr_cap);
            let mk = mk_scores
                .get(line.player_name.as_str())
                .copied()
                .unwrap_or(0.0);

            let composite =
                kd * weights.kd + hs * weights.hs + adr * weights.adr + mk * weights.multikill;
            let overall_rating = composite.clamp(0.0, 100.0);

            RatedStatLine {
                stats: line.clone(),
                kd_score: kd,
                hs_score: hs,
                adr_score: adr,
                multikill_score: mk,
                overall_rating,
                rank: 0,
                tier: SkillTier::from_rating(overall_rating),
            }
        })
        .collect();

    let ratings: Vec<f64> = lines.iter().map(|l| l.overall_rating).collect();
    for (line, rank) in lines.iter_mut().zip(dense_rank(&ratings)) {
        line.rank = rank;
    }

    lines.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then_with(|| a.stats.player_name.cmp(&b.stats.player_name))
    });

    debug!("Rated {} players", lines.len());

    RatingOutcome {
        lines,
        effective_weights: weights,
        anomaly,
    }
}
