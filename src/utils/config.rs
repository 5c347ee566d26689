//! Configuration and constants for the engine and CLI.
//!
//! Every tunable the engine uses lives in [`EngineConfig`] and is passed
//! explicitly into each call. The constants below are only defaults.

use super::error::ConfigError;
use crate::rating::RatingWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Max tick distance between an event and the position sample used for it.
/// 32 ticks is roughly one second at the usual tick rates.
pub const DEFAULT_POSITION_TOLERANCE: u32 = 32;

/// K/D ratio that maps to a full kd_score
pub const DEFAULT_KD_CAP: f64 = 3.0;

/// ADR that maps to a full adr_score
pub const DEFAULT_ADR_CAP: f64 = 150.0;

// Weight vectors whose sum falls inside this band are used as-is
pub const WEIGHT_SUM_MIN: f64 = 0.99;
pub const WEIGHT_SUM_MAX: f64 = 1.01;

/// Points per multi-kill round: (min kills, points). Checked top-down.
pub const MULTIKILL_BAND_POINTS: &[(u32, f64)] = &[(5, 50.0), (4, 30.0), (3, 15.0), (2, 5.0)];

/// Upper bound for the summed multi-kill score
pub const MULTIKILL_SCORE_CAP: f64 = 100.0;

/// Default ceiling on total decoded events accepted by the CLI
pub const DEFAULT_MAX_EVENTS: usize = 5_000_000;

// Field names for decoded input (different decoder builds use different names)
pub const KILL_TABLE_NAMES: &[&str] = &["kills", "player_death", "deaths"];
pub const DAMAGE_TABLE_NAMES: &[&str] = &["damages", "player_hurt", "damage"];
pub const ROUND_TABLE_NAMES: &[&str] = &["rounds", "round_end"];
pub const POSITION_TABLE_NAMES: &[&str] = &["positions", "ticks", "samples"];

pub const VICTIM_FIELD_NAMES: &[&str] = &["victim_name", "user_name", "victim"];
pub const DAMAGE_FIELD_NAMES: &[&str] = &["damage_amount", "dmg_health", "damage", "dmg"];
pub const HEADSHOT_FIELD_NAMES: &[&str] = &["is_headshot", "headshot"];
pub const WINNER_FIELD_NAMES: &[&str] = &["round_winner", "winner"];
pub const PLAYER_FIELD_NAMES: &[&str] = &["player_name", "name"];

/// Engine configuration, threaded through every engine call
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Rating weight vector
    #[serde(default)]
    pub weights: RatingWeights,

    /// Tick tolerance for position correlation
    #[serde(default = "default_position_tolerance")]
    pub position_tolerance: u32,

    /// K/D normalization cap
    #[serde(default = "default_kd_cap")]
    pub kd_cap: f64,

    /// ADR normalization cap
    #[serde(default = "default_adr_cap")]
    pub adr_cap: f64,
}

fn default_position_tolerance() -> u32 {
    DEFAULT_POSITION_TOLERANCE
}

fn default_kd_cap() -> f64 {
    DEFAULT_KD_CAP
}

fn default_adr_cap() -> f64 {
    DEFAULT_ADR_CAP
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: RatingWeights::default(),
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            kd_cap: DEFAULT_KD_CAP,
            adr_cap: DEFAULT_ADR_CAP,
        }
    }
}

impl EngineConfig {
    /// Reject values no engine run can use.
    ///
    /// Weight sums are *not* checked here; an off-sum vector is normalized
    /// at rating time and reported as a warning instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.position_tolerance == 0 {
            return Err(ConfigError::Invalid(
                "position_tolerance must be a positive tick count".to_string(),
            ));
        }

        if !(self.kd_cap.is_finite() && self.kd_cap > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "kd_cap must be positive, got {}",
                self.kd_cap
            )));
        }

        if !(self.adr_cap.is_finite() && self.adr_cap > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "adr_cap must be positive, got {}",
                self.adr_cap
            )));
        }

        let w = &self.weights;
        for (name, value) in [
            ("kd", w.kd),
            ("hs", w.hs),
            ("adr", w.adr),
            ("multikill", w.multikill),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Load engine configuration from a TOML file
///
/// Missing keys fall back to their defaults, so an empty file is valid.
///
/// # Example
/// ```ignore
/// let config = load_config("engine.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            position_tolerance = 64

            [weights]
            kd = 0.5
            hs = 0.5
            adr = 0.0
            multikill = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.position_tolerance, 64);
        assert_eq!(config.kd_cap, DEFAULT_KD_CAP);
        assert_eq!(config.adr_cap, DEFAULT_ADR_CAP);
        assert_eq!(config.weights.kd, 0.5);
    }

    #[test]
    fn test_zero_tolerance_rejected() {
        let config = EngineConfig {
            position_tolerance: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.weights.hs = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "adr_cap = 120.0\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.adr_cap, 120.0);
        assert_eq!(config.position_tolerance, DEFAULT_POSITION_TOLERANCE);
    }
}
