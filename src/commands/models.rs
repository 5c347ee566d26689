use crate::rating::RatingWeights;
use crate::utils::config::DEFAULT_MAX_EVENTS;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Decoded event tables (JSON)
    pub input: PathBuf,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Output path for the rated stats CSV (optional)
    pub output_csv: Option<PathBuf>,

    /// Engine configuration file (TOML, optional)
    pub config_path: Option<PathBuf>,

    /// Per-invocation weight overrides
    pub weight_overrides: WeightOverrides,

    /// Position correlation tolerance override, in ticks
    pub tolerance: Option<u32>,

    /// Reject inputs with more events than this
    pub max_events: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("artifacts/report.json"),
            output_csv: None,
            config_path: None,
            weight_overrides: WeightOverrides::default(),
            tolerance: None,
            max_events: DEFAULT_MAX_EVENTS,
            print_summary: false,
        }
    }
}

/// Weight components given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightOverrides {
    pub kd: Option<f64>,
    pub hs: Option<f64>,
    pub adr: Option<f64>,
    pub multikill: Option<f64>,
}

impl WeightOverrides {
    /// Set components as (name, value) pairs
    pub fn given(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("kd", self.kd),
            ("hs", self.hs),
            ("adr", self.adr),
            ("multikill", self.multikill),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    /// True when no component was given
    pub fn is_empty(&self) -> bool {
        self.given().next().is_none()
    }

    /// Replace the given components of `weights`, leaving the rest as configured
    pub fn apply(&self, weights: &mut RatingWeights) {
        if let Some(kd) = self.kd {
            weights.kd = kd;
        }
        if let Some(hs) = self.hs {
            weights.hs = hs;
        }
        if let Some(adr) = self.adr {
            weights.adr = adr;
        }
        if let Some(multikill) = self.multikill {
            weights.multikill = multikill;
        }
    }
}
