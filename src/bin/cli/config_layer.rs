//! Configuration Layer Management
//!
//! Merges, in increasing priority: built-in defaults, a configuration file
//! (explicit `--config` or an implicit `.success-norm.yml` in the working
//! directory), and CLI flags.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::NormaliseArgs;
use success_norm::core::config::{
    DegeneratePolicy, MalformedLinePolicy, ReportFormat, SuccessNormConfig,
};

/// File names searched in the working directory when `--config` is absent.
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".success-norm.yml", ".success-norm.yaml"];

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another configuration into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

/// Settings given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub rates_path: Option<PathBuf>,
    pub images_path: Option<PathBuf>,
    pub average_rating: Option<f64>,
    pub precision: Option<u32>,
    pub on_degenerate: Option<DegeneratePolicy>,
    pub on_malformed: Option<MalformedLinePolicy>,
    pub format: Option<ReportFormat>,
}

impl FromCliArgs<NormaliseArgs> for CliOverrides {
    fn from_cli_args(args: &NormaliseArgs) -> Self {
        Self {
            rates_path: args.rates.clone(),
            images_path: args.images.clone(),
            average_rating: args.average,
            precision: args.precision,
            on_degenerate: args.on_degenerate,
            on_malformed: args.on_malformed,
            format: args.format,
        }
    }
}

impl ConfigMerge<CliOverrides> for SuccessNormConfig {
    fn merge_with(&mut self, other: CliOverrides) {
        if let Some(path) = other.rates_path {
            self.input.rates_path = path;
        }
        if let Some(path) = other.images_path {
            self.input.images_path = path;
        }
        if let Some(average) = other.average_rating {
            self.normalisation.average_rating = average;
        }
        if let Some(precision) = other.precision {
            self.normalisation.precision = precision;
        }
        if let Some(policy) = other.on_degenerate {
            self.normalisation.on_degenerate = policy;
        }
        if let Some(policy) = other.on_malformed {
            self.normalisation.on_malformed = policy;
        }
        if let Some(format) = other.format {
            self.output.format = format;
        }
    }
}

/// Find an implicit configuration file inside `dir`.
pub fn find_implicit_config(dir: &Path) -> Option<PathBuf> {
    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Load the file layer, falling back to defaults when no file applies.
pub fn load_file_layer(explicit: Option<&Path>) -> anyhow::Result<SuccessNormConfig> {
    let implicit = if explicit.is_none() {
        find_implicit_config(Path::new("."))
    } else {
        None
    };

    match explicit.map(Path::to_path_buf).or(implicit) {
        Some(config_path) => {
            debug!("Loading configuration from {}", config_path.display());
            SuccessNormConfig::from_yaml_file(&config_path).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to load configuration from {}: {}",
                    config_path.display(),
                    e
                )
            })
        }
        None => Ok(SuccessNormConfig::default()),
    }
}

/// Enhanced configuration loading with layered approach
pub fn build_layered_config(args: &NormaliseArgs) -> anyhow::Result<SuccessNormConfig> {
    let mut config = load_file_layer(args.config.as_deref())?;
    config.merge_with(CliOverrides::from_cli_args(args));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}
