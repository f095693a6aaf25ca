//! Validation helper functions for configuration types.

use crate::core::errors::{Result, NormError};

/// Validate that an f64 value is finite (neither NaN nor infinite).
pub fn validate_finite(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(NormError::validation_field(
            format!("{} must be a finite number", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is in the unit range [0.0, 1.0].
pub fn validate_unit_range(value: f64, field: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(NormError::validation_field(
            format!("{} must be between 0.0 and 1.0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a u32 value is within a bounded range (inclusive).
pub fn validate_bounded_u32(value: u32, min: u32, max: u32, field: &str) -> Result<()> {
    if value < min || value > max {
        return Err(NormError::validation_field(
            format!("{} must be between {} and {}", field, min, max),
            field,
        ));
    }
    Ok(())
}

/// Validate that a path-like string is not empty or whitespace.
pub fn validate_non_empty_path(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NormError::validation_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    Ok(())
}
