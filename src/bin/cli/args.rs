//! CLI Argument Structures
//!
//! All command and argument definitions for the success-norm binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use success_norm::core::config::{DegeneratePolicy, MalformedLinePolicy, ReportFormat};

/// Complexity-corrected success rates for image datasets
#[derive(Parser)]
#[command(name = "success-norm")]
#[command(version = success_norm::VERSION)]
#[command(about = "Normalise per-image success rates for image complexity")]
#[command(long_about = "
Join a rate table (imageId,rate) with an image observation table and print a
complexity-corrected rating for every rated image.

Common Usage:

  # Use the default file names in the current directory
  success-norm normalise

  # Explicit inputs
  success-norm normalise --rates imgSuccessRate.txt --images excel.csv

  # A different dataset needs its own average success rate
  success-norm normalise --average 0.64 --rates rates.txt --images obs.csv

  # Write a starter configuration file
  success-norm init-config
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging (written to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute and print normalised ratings
    #[command(alias = "normalize")]
    Normalise(NormaliseArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a success-norm configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct NormaliseArgs {
    /// Rate table: one `imageId,rate` pair per line [default: imgSuccessRate.txt]
    #[arg(long, env = "SUCCESS_NORM_RATES")]
    pub rates: Option<PathBuf>,

    /// Image table: identifier in column 5, rating in column 15 [default: excel.csv]
    #[arg(long, env = "SUCCESS_NORM_IMAGES")]
    pub images: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dataset-wide average success rate (0.0-1.0) [default: 0.77]
    #[arg(long)]
    pub average: Option<f64>,

    /// Fractional digits in the report (0-10) [default: 4]
    #[arg(long)]
    pub precision: Option<u32>,

    /// Behaviour when an image's summed complexity score is zero
    #[arg(long, value_enum)]
    pub on_degenerate: Option<DegeneratePolicy>,

    /// Behaviour when an input line cannot be parsed
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedLinePolicy>,

    /// Output format: csv (imageId,rating lines) or jsonl (one JSON object per line)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".success-norm.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}
