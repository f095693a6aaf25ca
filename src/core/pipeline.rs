//! End-to-end normalisation run.
//!
//! Stages execute strictly in sequence: rate table, image table, normaliser,
//! report. Each input file is fully read and closed before the next stage
//! starts.

use std::io::Write;

use tracing::info;

use crate::core::config::SuccessNormConfig;
use crate::core::errors::Result;
use crate::core::normalise::{NormalisedRating, Normaliser};
use crate::io::images::ImageLoader;
use crate::io::rates::RateLoader;
use crate::io::report::{render_report, write_report};

/// Runs the load, normalise and report stages for one configuration.
#[derive(Debug, Clone)]
pub struct NormalisationPipeline {
    config: SuccessNormConfig,
}

impl NormalisationPipeline {
    /// Build a pipeline after validating `config`.
    pub fn new(config: SuccessNormConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this pipeline runs with.
    pub fn config(&self) -> &SuccessNormConfig {
        &self.config
    }

    /// Load both tables and compute ratings without rendering them.
    pub fn compute(&self) -> Result<Vec<NormalisedRating>> {
        let input = &self.config.input;
        let params = &self.config.normalisation;

        let rates = RateLoader::new(params.on_malformed).load(&input.rates_path)?;
        let images =
            ImageLoader::new(params.average_rating, params.on_malformed).load(&input.images_path)?;

        Normaliser::from_config(params).normalise(&rates, &images)
    }

    /// Compute ratings and render the full report text.
    pub fn render(&self) -> Result<String> {
        let ratings = self.compute()?;
        render_report(
            &ratings,
            self.config.output.format,
            self.config.normalisation.precision,
        )
    }

    /// Compute, render and write the report to `writer` in one write.
    ///
    /// Returns the number of report lines written.
    pub fn run<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let report = self.render()?;
        let lines = report.lines().count();
        write_report(writer, &report)?;
        info!("Wrote {} report lines", lines);
        Ok(lines)
    }
}
