//! CLI Command Implementations
//!
//! - normalise: compute and print the ratings report
//! - config: configuration management commands

pub mod config;
pub mod normalise;

pub use config::{init_config, print_default_config, validate_config};
pub use normalise::normalise_command;
