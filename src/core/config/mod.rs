//! Configuration types and management for success-norm.
//!
//! The dataset-wide average success rate used to be a compiled-in constant.
//! Here it is an explicit [`NormalisationConfig::average_rating`] value that
//! is handed to the image loader and the normaliser when they are built, so
//! switching datasets is a configuration change rather than a code change.

pub mod validation;

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::errors::{NormError, Result};

pub use validation::{
    validate_bounded_u32, validate_finite, validate_non_empty_path, validate_unit_range,
};

/// Mean success rate of the reference dataset.
pub const DEFAULT_AVERAGE_RATING: f64 = 0.77;

/// Fractional digits printed for each normalised rating.
pub const DEFAULT_PRECISION: u32 = 4;

/// Largest precision accepted by validation.
pub const MAX_PRECISION: u32 = 10;

/// What to do when a rated image has a summed complexity score of zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Abort the run with a degenerate-input error
    #[default]
    Error,
    /// Emit the IEEE-754 result (`Infinity` or `NaN`)
    NonFinite,
}

/// What to do with a line that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Abort the run with a format error
    #[default]
    Abort,
    /// Log a warning and continue with the next line
    Skip,
}

/// Report rendering format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// `imageId,rating` lines
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Main configuration for a normalisation run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuccessNormConfig {
    /// Input file locations
    #[serde(default)]
    pub input: InputConfig,

    /// Normalisation parameters
    #[serde(default)]
    pub normalisation: NormalisationConfig,

    /// Report settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration construction and I/O methods for [`SuccessNormConfig`].
impl SuccessNormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            NormError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            NormError::config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            NormError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.normalisation.validate()?;
        Ok(())
    }
}

/// Locations of the two input tables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Two-column rate table (`imageId,rate`)
    #[serde(default = "InputConfig::default_rates_path")]
    pub rates_path: PathBuf,

    /// Wide image/feature table (identifier in column 5, rating in column 15)
    #[serde(default = "InputConfig::default_images_path")]
    pub images_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rates_path: Self::default_rates_path(),
            images_path: Self::default_images_path(),
        }
    }
}

impl InputConfig {
    fn default_rates_path() -> PathBuf {
        PathBuf::from("imgSuccessRate.txt")
    }

    fn default_images_path() -> PathBuf {
        PathBuf::from("excel.csv")
    }

    /// Validate input locations.
    pub fn validate(&self) -> Result<()> {
        validate_non_empty_path(&self.rates_path.to_string_lossy(), "input.rates_path")?;
        validate_non_empty_path(&self.images_path.to_string_lossy(), "input.images_path")?;
        Ok(())
    }
}

/// Parameters of the complexity correction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalisationConfig {
    /// Dataset-wide mean success rate. Must match the dataset being processed.
    #[serde(default = "NormalisationConfig::default_average_rating")]
    pub average_rating: f64,

    /// Fractional digits kept when printing ratings
    #[serde(default = "NormalisationConfig::default_precision")]
    pub precision: u32,

    /// Handling of zero summed complexity scores
    #[serde(default)]
    pub on_degenerate: DegeneratePolicy,

    /// Handling of unparseable input lines
    #[serde(default)]
    pub on_malformed: MalformedLinePolicy,
}

impl Default for NormalisationConfig {
    fn default() -> Self {
        Self {
            average_rating: Self::default_average_rating(),
            precision: Self::default_precision(),
            on_degenerate: DegeneratePolicy::default(),
            on_malformed: MalformedLinePolicy::default(),
        }
    }
}

impl NormalisationConfig {
    const fn default_average_rating() -> f64 {
        DEFAULT_AVERAGE_RATING
    }

    const fn default_precision() -> u32 {
        DEFAULT_PRECISION
    }

    /// Validate normalisation parameters.
    pub fn validate(&self) -> Result<()> {
        validate_finite(self.average_rating, "normalisation.average_rating")?;
        validate_unit_range(self.average_rating, "normalisation.average_rating")?;
        validate_bounded_u32(self.precision, 0, MAX_PRECISION, "normalisation.precision")?;
        Ok(())
    }
}

/// Report output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Rendering format
    #[serde(default)]
    pub format: ReportFormat,
}
