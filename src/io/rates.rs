//! Rate table loading.
//!
//! The rate table is a headerless two-column file, `imageId,rate`, one image
//! per line. A later line for the same identifier replaces the earlier value
//! but keeps the position of its first appearance.

use std::path::Path;

use csv::StringRecord;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::config::MalformedLinePolicy;
use crate::core::errors::{NormError, Result};
use crate::io::records::{parse_number, visit_records};

/// Raw success rate per image identifier, in first-appearance order.
pub type RateTable = IndexMap<String, f64>;

/// Number of fields on every rate table line.
pub const RATE_FIELDS: usize = 2;

/// One parsed line of the rate table.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    /// Image identifier (field 0)
    pub image_id: String,
    /// Raw success rate (field 1), expected in [0, 1]
    pub rate: f64,
}

impl RateEntry {
    /// Parse a rate table record, requiring exactly two fields after trailing
    /// empty fields are dropped.
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        if record.len() != RATE_FIELDS {
            return Err(NormError::format(format!(
                "Expected {RATE_FIELDS} fields (imageId,rate), found {}",
                record.len()
            )));
        }

        Ok(Self {
            image_id: record[0].to_string(),
            rate: parse_number(&record[1], "rate")?,
        })
    }
}

/// Loads the rate table from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLoader {
    on_malformed: MalformedLinePolicy,
}

impl RateLoader {
    /// Create a loader with the given malformed-line policy.
    pub fn new(on_malformed: MalformedLinePolicy) -> Self {
        Self { on_malformed }
    }

    /// Read `path` into a [`RateTable`].
    pub fn load(&self, path: &Path) -> Result<RateTable> {
        let mut rates = RateTable::new();

        let stats = visit_records(path, self.on_malformed, |record| {
            let entry = RateEntry::from_record(record)?;
            if let Some(previous) = rates.insert(entry.image_id.clone(), entry.rate) {
                debug!(
                    image_id = %entry.image_id,
                    previous,
                    rate = entry.rate,
                    "Duplicate rate entry overrides earlier value"
                );
            }
            Ok(())
        })?;

        info!(
            "Loaded {} rate entries ({} distinct, {} skipped) from {}",
            stats.accepted,
            rates.len(),
            stats.skipped,
            path.display()
        );
        Ok(rates)
    }
}
