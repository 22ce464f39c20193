//! Configuration types deserialized from `mosaic.toml`.

use crate::error::ConfigError;
use serde::Deserialize;

/// The top-level configuration parsed from `mosaic.toml`.
///
/// Every field has a default, so an empty (or absent) file is a valid
/// configuration. Command-line flags override whatever is loaded here.
#[derive(Debug, Default, Deserialize)]
pub struct FloorplanConfig {
    /// Annealing search parameters.
    #[serde(default)]
    pub search: SearchConfig,
    /// Output artifact settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Search parameters for the `[search]` table.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Area/wirelength blend weight in `[0, 1]`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Geometric cooling ratio per temperature level, in `(0, 1)`.
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,
    /// Temperature threshold that terminates a schedule.
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,
    /// Trials per temperature level, as a multiplier of the block count.
    #[serde(default = "default_moves_per_block")]
    pub moves_per_block: usize,
    /// Steps of the calibration walk that seeds the initial temperature.
    #[serde(default = "default_calibration_moves")]
    pub calibration_moves: usize,
    /// Target initial acceptance probability for uphill moves, in `(0, 1)`.
    #[serde(default = "default_initial_acceptance")]
    pub initial_acceptance: f64,
    /// Extra schedules to run while the best placement does not fit.
    #[serde(default = "default_max_restarts")]
    pub max_restarts: usize,
    /// Selection weight of the rotate move family.
    #[serde(default = "default_weight")]
    pub rotate_weight: u32,
    /// Selection weight of the swap move family.
    #[serde(default = "default_weight")]
    pub swap_weight: u32,
    /// Selection weight of the delete-and-reinsert move family.
    #[serde(default = "default_weight")]
    pub delete_insert_weight: u32,
}

fn default_alpha() -> f64 {
    0.5
}

fn default_cooling_rate() -> f64 {
    0.95
}

fn default_min_temperature() -> f64 {
    0.01
}

fn default_moves_per_block() -> usize {
    10
}

fn default_calibration_moves() -> usize {
    128
}

fn default_initial_acceptance() -> f64 {
    0.9
}

fn default_max_restarts() -> usize {
    4
}

fn default_weight() -> u32 {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            seed: None,
            cooling_rate: default_cooling_rate(),
            min_temperature: default_min_temperature(),
            moves_per_block: default_moves_per_block(),
            calibration_moves: default_calibration_moves(),
            initial_acceptance: default_initial_acceptance(),
            max_restarts: default_max_restarts(),
            rotate_weight: default_weight(),
            swap_weight: default_weight(),
            delete_insert_weight: default_weight(),
        }
    }
}

impl SearchConfig {
    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::ValidationError(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..1.0).contains(&self.cooling_rate) || self.cooling_rate == 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "cooling_rate must be within (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(0.0..1.0).contains(&self.initial_acceptance) || self.initial_acceptance == 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "initial_acceptance must be within (0, 1), got {}",
                self.initial_acceptance
            )));
        }
        if self.min_temperature <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if self.rotate_weight + self.swap_weight + self.delete_insert_weight == 0 {
            return Err(ConfigError::ValidationError(
                "at least one move weight must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Output settings for the `[output]` table.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the result report file.
    #[serde(default)]
    pub result: Option<String>,
    /// Path of an SVG rendering of the final placement.
    #[serde(default)]
    pub svg: Option<String>,
}
