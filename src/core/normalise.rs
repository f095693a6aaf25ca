//! Complexity-corrected success rates.
//!
//! For each rated image the deviation of its success rate from the dataset
//! average is divided by the square root of the summed complexity scores of
//! every observation of that image:
//!
//! ```text
//! rating = |rate - average| / sqrt(sum(complexity_score))
//! ```
//!
//! Inputs are borrowed read-only and a fresh result vector is returned, one
//! entry per distinct rate table identifier, in rate table order.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::config::{DegeneratePolicy, NormalisationConfig};
use crate::core::errors::{NormError, Result};
use crate::io::images::ImageRecord;
use crate::io::rates::RateTable;

/// Normalised rating for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalisedRating {
    /// Identifier from the rate table
    pub image_id: String,
    /// Complexity-corrected rating, unrounded
    pub rating: f64,
    /// Number of image rows joined for this identifier
    pub observations: usize,
}

/// Summed complexity of all observations sharing an identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ComplexityTotal {
    sum: f64,
    observations: usize,
}

/// Computes normalised ratings from a rate table and scored image records.
#[derive(Debug, Clone, Copy)]
pub struct Normaliser {
    average_rating: f64,
    on_degenerate: DegeneratePolicy,
}

impl Normaliser {
    /// Create a normaliser for a dataset with the given average success rate.
    pub fn new(average_rating: f64, on_degenerate: DegeneratePolicy) -> Self {
        Self {
            average_rating,
            on_degenerate,
        }
    }

    /// Create a normaliser from configuration.
    pub fn from_config(config: &NormalisationConfig) -> Self {
        Self::new(config.average_rating, config.on_degenerate)
    }

    /// Normalise every entry of `rates` against `images`.
    ///
    /// Under [`DegeneratePolicy::Error`] the first identifier whose summed
    /// complexity is zero aborts the whole computation; no partial result is
    /// returned.
    pub fn normalise(&self, rates: &RateTable, images: &[ImageRecord]) -> Result<Vec<NormalisedRating>> {
        let totals = complexity_totals(images);
        let mut results = Vec::with_capacity(rates.len());

        for (image_id, &rate) in rates {
            let total = totals.get(image_id.as_str()).copied().unwrap_or_default();
            results.push(self.rate_one(image_id, rate, total)?);
        }

        let non_finite = results.iter().filter(|r| !r.rating.is_finite()).count();
        info!(
            "Normalised {} images against {} image records ({} non-finite)",
            results.len(),
            images.len(),
            non_finite
        );
        Ok(results)
    }

    fn rate_one(&self, image_id: &str, rate: f64, total: ComplexityTotal) -> Result<NormalisedRating> {
        if total.sum == 0.0 {
            let reason = if total.observations == 0 {
                "no matching image records".to_string()
            } else {
                format!(
                    "summed complexity score of {} records is zero",
                    total.observations
                )
            };

            match self.on_degenerate {
                DegeneratePolicy::Error => return Err(NormError::degenerate(image_id, reason)),
                DegeneratePolicy::NonFinite => {
                    warn!(image_id, "Division by zero ({reason}); emitting non-finite rating");
                }
            }
        }

        let shift = (rate - self.average_rating).abs();
        let sigma = total.sum.sqrt();
        let rating = shift / sigma;

        debug!(
            image_id,
            rate,
            shift,
            sigma,
            rating,
            observations = total.observations,
            "Normalised rating"
        );

        Ok(NormalisedRating {
            image_id: image_id.to_string(),
            rating,
            observations: total.observations,
        })
    }
}

/// Sum complexity scores per identifier in a single pass.
fn complexity_totals(images: &[ImageRecord]) -> HashMap<&str, ComplexityTotal> {
    let mut totals: HashMap<&str, ComplexityTotal> = HashMap::new();
    for image in images {
        let entry = totals.entry(image.image_id.as_str()).or_default();
        entry.sum += image.complexity_score;
        entry.observations += 1;
    }
    totals
}
