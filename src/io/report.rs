//! Report rendering.
//!
//! The report is rendered fully in memory and written in a single call, so a
//! failed run never leaves a partial report on stdout.

use std::io::Write;

use serde_json::{json, Value};

use crate::core::config::ReportFormat;
use crate::core::errors::{NormError, Result};
use crate::core::normalise::NormalisedRating;

/// Format a rating with at most `precision` fractional digits.
///
/// Rounds with the standard fixed-precision formatter, then drops trailing
/// zeros and a dangling decimal point. Never uses scientific notation.
/// Non-finite values print as `Infinity`, `-Infinity` or `NaN`.
pub fn format_rating(value: f64, precision: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let mut text = format!("{:.*}", precision as usize, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Rounded rating as a JSON value; non-finite ratings become strings.
fn rating_value(value: f64, precision: u32) -> Value {
    let text = format_rating(value, precision);
    match text.parse::<f64>() {
        Ok(rounded) if rounded.is_finite() => json!(rounded),
        _ => Value::String(text),
    }
}

/// Render all ratings in the requested format.
pub fn render_report(ratings: &[NormalisedRating], format: ReportFormat, precision: u32) -> Result<String> {
    let mut out = String::new();
    match format {
        ReportFormat::Csv => {
            for rating in ratings {
                out.push_str(&rating.image_id);
                out.push(',');
                out.push_str(&format_rating(rating.rating, precision));
                out.push('\n');
            }
        }
        ReportFormat::Jsonl => {
            for rating in ratings {
                let line = json!({
                    "image_id": rating.image_id,
                    "normalised_rating": rating_value(rating.rating, precision),
                    "observations": rating.observations,
                });
                out.push_str(&serde_json::to_string(&line)?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

/// Write a rendered report in one call and flush.
pub fn write_report<W: Write>(writer: &mut W, report: &str) -> Result<()> {
    writer
        .write_all(report.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| NormError::io("Failed to write report", e))
}
