//! Rating weight vector and its normalization.

use crate::utils::config::{WEIGHT_SUM_MAX, WEIGHT_SUM_MIN};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative importance of each sub-score in the composite rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingWeights {
    pub kd: f64,
    pub hs: f64,
    pub adr: f64,
    pub multikill: f64,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            kd: 0.35,
            hs: 0.20,
            adr: 0.30,
            multikill: 0.15,
        }
    }
}

/// Weight vector that could not be used as given
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightAnomaly {
    /// Sum was outside the accepted band and was scaled to 1.0
    Renormalized { original_sum: f64 },

    /// Nothing usable to scale; defaults were applied
    Degenerate { original_sum: f64 },
}

impl fmt::Display for WeightAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renormalized { original_sum } => write!(
                f,
                "Rating weights sum to {:.2}; normalized to 1.0",
                original_sum
            ),
            Self::Degenerate { original_sum } => write!(
                f,
                "Rating weights sum to {:.2}; default weights used instead",
                original_sum
            ),
        }
    }
}

impl RatingWeights {
    pub fn new(kd: f64, hs: f64, adr: f64, multikill: f64) -> Self {
        Self {
            kd,
            hs,
            adr,
            multikill,
        }
    }

    pub fn sum(&self) -> f64 {
        self.kd + self.hs + self.adr + self.multikill
    }

    /// Weights safe to apply, plus the anomaly if any correction was needed
    ///
    /// A vector summing to within [0.99, 1.01] is returned unchanged.
    /// Otherwise it is scaled to sum to 1.0. Negative or non-finite
    /// components count as zero; if nothing positive is left the default
    /// weights are used.
    pub fn normalized(&self) -> (RatingWeights, Option<WeightAnomaly>) {
        let original_sum = self.sum();
        let sanitize = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let clean = Self::new(
            sanitize(self.kd),
            sanitize(self.hs),
            sanitize(self.adr),
            sanitize(self.multikill),
        );
        let clean_sum = clean.sum();

        if clean == *self && (WEIGHT_SUM_MIN..=WEIGHT_SUM_MAX).contains(&clean_sum) {
            return (*self, None);
        }

        let (weights, anomaly) = if clean_sum > 0.0 && clean_sum.is_finite() {
            let scaled = Self::new(
                clean.kd / clean_sum,
                clean.hs / clean_sum,
                clean.adr / clean_sum,
                clean.multikill / clean_sum,
            );
            (scaled, WeightAnomaly::Renormalized { original_sum })
        } else {
            (Self::default(), WeightAnomaly::Degenerate { original_sum })
        };

        warn!("{}", anomaly);

        (weights, Some(anomaly))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let (weights, anomaly) = RatingWeights::default().normalized();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(anomaly.is_none());
    }

    #[test]
    fn test_in_band_weights_unmodified() {
        let input = RatingWeights::new(0.5, 0.5, 0.0, 0.0);
        let (weights, anomaly) = input.normalized();
        assert_eq!(weights, input);
        assert!(anomaly.is_none());
    }

    #[test]
    fn test_equal_weights_normalized_to_quarters() {
        let (weights, anomaly) = RatingWeights::new(1.0, 1.0, 1.0, 1.0).normalized();

        assert_eq!(weights, RatingWeights::new(0.25, 0.25, 0.25, 0.25));
        assert_eq!(
            anomaly,
            Some(WeightAnomaly::Renormalized { original_sum: 4.0 })
        );
        assert!(anomaly.unwrap().to_string().contains("4.00"));
    }

    #[test]
    fn test_positive_sums_normalize_to_one() {
        for input in [
            RatingWeights::new(0.1, 0.0, 0.0, 0.0),
            RatingWeights::new(3.0, 2.0, 7.5, 0.25),
            RatingWeights::new(0.3, 0.3, 0.3, 0.3),
            RatingWeights::new(1e-6, 2e-6, 0.0, 0.0),
        ] {
            let (weights, _) = input.normalized();
            assert!((weights.sum() - 1.0).abs() <= 0.01, "{:?}", input);
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_defaults() {
        let (weights, anomaly) = RatingWeights::new(0.0, 0.0, 0.0, 0.0).normalized();
        assert_eq!(weights, RatingWeights::default());
        assert!(matches!(anomaly, Some(WeightAnomaly::Degenerate { .. })));
    }

    #[test]
    fn test_negative_component_treated_as_zero() {
        let (weights, anomaly) = RatingWeights::new(1.0, -1.0, 1.0, 0.0).normalized();
        assert_eq!(weights.hs, 0.0);
        assert_eq!(weights.kd, 0.5);
        assert!(anomaly.is_some());
    }
}
