//! success-norm CLI - complexity-corrected success rates for image datasets
//!
//! Reads a rate table and an image observation table, and prints one
//! normalised rating per rated image to stdout. Logs go to stderr.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Normalise(args) => {
            cli::normalise_command(&args)?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
        Commands::InitConfig(args) => {
            cli::init_config(&args)?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(&args)?;
        }
    }

    Ok(())
}
