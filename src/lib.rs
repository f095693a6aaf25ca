//! # success-norm: Complexity-Corrected Success Rates
//!
//! Raw success rates make hard images look like poor performers. This crate
//! corrects each image's success rate for how far its individual observations
//! stray from the dataset average:
//!
//! - **Rate loading**: a two-column `imageId,rate` table
//! - **Image loading**: a wide observation table scored by squared deviation
//!   from the dataset average
//! - **Normalisation**: `|rate - average| / sqrt(sum of complexity scores)`
//! - **Reporting**: `imageId,rating` lines rounded to a fixed precision
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ Rate Loader  │   │ Image Loader │
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!          ┌──────▼──────┐     ┌──────────┐
//!          │ Normaliser  ├────►│ Reporter │
//!          └─────────────┘     └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use success_norm::{NormalisationPipeline, SuccessNormConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = SuccessNormConfig::default();
//!     config.input.rates_path = "rates.txt".into();
//!     config.input.images_path = "images.csv".into();
//!
//!     let pipeline = NormalisationPipeline::new(config)?;
//!     pipeline.run(&mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

// Core computation and configuration
pub mod core {
    //! Configuration, errors, and the normalisation algorithm.

    pub mod config;
    pub mod errors;
    pub mod normalise;
    pub mod pipeline;
}

// Input tables and report output
pub mod io {
    //! Delimited input parsing and report rendering.

    pub mod images;
    pub mod rates;
    pub mod records;
    pub mod report;
}

// Re-export primary types for convenience
pub use crate::core::config::SuccessNormConfig;
pub use crate::core::errors::{NormError, Result};
pub use crate::core::normalise::{NormalisedRating, Normaliser};
pub use crate::core::pipeline::NormalisationPipeline;
pub use crate::io::images::{ImageLoader, ImageRecord};
pub use crate::io::rates::{RateLoader, RateTable};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
