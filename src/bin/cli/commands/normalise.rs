//! Normalisation command.

use std::io;

use tracing::info;

use crate::cli::args::NormaliseArgs;
use crate::cli::config_layer::build_layered_config;
use success_norm::NormalisationPipeline;

/// Run the pipeline and print the report to stdout.
///
/// The report is written once, after every rating has been computed; any
/// loader or degenerate-input error leaves stdout untouched.
pub fn normalise_command(args: &NormaliseArgs) -> anyhow::Result<()> {
    let pipeline = NormalisationPipeline::new(build_layered_config(args)?)?;
    let config = pipeline.config();
    info!(
        rates = %config.input.rates_path.display(),
        images = %config.input.images_path.display(),
        average = config.normalisation.average_rating,
        "Starting normalisation"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    pipeline.run(&mut handle)?;

    Ok(())
}
