//! Image table loading.
//!
//! The image table is wide and headerless. Only two columns matter: the image
//! identifier at index 5 and the per-observation rating at index 15. Rows are
//! parsed into an [`ImageRow`] at the read boundary so a short or shifted line
//! fails there instead of feeding the wrong column into the arithmetic.

use std::path::Path;

use csv::StringRecord;
use serde::Serialize;
use tracing::info;

use crate::core::config::MalformedLinePolicy;
use crate::core::errors::{NormError, Result};
use crate::io::records::{parse_number, visit_records};

/// Column holding the image identifier.
pub const IMAGE_ID_COLUMN: usize = 5;

/// Column holding the observed rating.
pub const RATING_COLUMN: usize = 15;

/// Minimum number of fields on an image table line.
pub const MIN_IMAGE_FIELDS: usize = RATING_COLUMN + 1;

/// Typed view of the two columns used from an image table line.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRow {
    /// Image identifier
    pub image_id: String,
    /// Observed rating for this row
    pub rating: f64,
}

impl ImageRow {
    /// Extract the named columns from a raw record.
    pub fn from_record(record: &StringRecord) -> Result<Self> {
        if record.len() < MIN_IMAGE_FIELDS {
            return Err(NormError::format(format!(
                "Expected at least {MIN_IMAGE_FIELDS} fields, found {}",
                record.len()
            )));
        }

        Ok(Self {
            image_id: record[IMAGE_ID_COLUMN].to_string(),
            rating: parse_number(&record[RATING_COLUMN], "rating")?,
        })
    }
}

/// One observation of an image with its complexity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    /// Image identifier; not unique across records
    pub image_id: String,
    /// Squared deviation of the row rating from the dataset average
    pub complexity_score: f64,
}

impl ImageRecord {
    /// Score a parsed row against the dataset average.
    pub fn from_row(row: ImageRow, average_rating: f64) -> Self {
        let deviation = row.rating - average_rating;
        Self {
            image_id: row.image_id,
            complexity_score: deviation * deviation,
        }
    }
}

/// Loads the image table and scores every row.
#[derive(Debug, Clone, Copy)]
pub struct ImageLoader {
    average_rating: f64,
    on_malformed: MalformedLinePolicy,
}

impl ImageLoader {
    /// Create a loader scoring rows against `average_rating`.
    pub fn new(average_rating: f64, on_malformed: MalformedLinePolicy) -> Self {
        Self {
            average_rating,
            on_malformed,
        }
    }

    /// Read `path` into image records, in line order, duplicates retained.
    pub fn load(&self, path: &Path) -> Result<Vec<ImageRecord>> {
        let mut images = Vec::new();

        let stats = visit_records(path, self.on_malformed, |record| {
            let row = ImageRow::from_record(record)?;
            images.push(ImageRecord::from_row(row, self.average_rating));
            Ok(())
        })?;

        info!(
            "Loaded {} image records ({} skipped) from {}",
            images.len(),
            stats.skipped,
            path.display()
        );
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Build a 16-column line with `id` at column 5 and `rating` at column 15.
    fn image_line(id: &str, rating: &str) -> String {
        let mut fields: Vec<String> = (0..MIN_IMAGE_FIELDS).map(|i| format!("c{i}")).collect();
        fields[IMAGE_ID_COLUMN] = id.to_string();
        fields[RATING_COLUMN] = rating.to_string();
        fields.join(",")
    }

    fn image_file(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
        file
    }

    #[test]
    fn test_complexity_score_is_squared_deviation() {
        let file = image_file(&[image_line("img1", "0.80"), image_line("img1", "0.70")]);
        let images = ImageLoader::new(0.77, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect("load images");

        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|img| img.image_id == "img1"));
        assert_relative_eq!(images[0].complexity_score, 0.0009, epsilon = 1e-12);
        assert_relative_eq!(images[1].complexity_score, 0.0049, epsilon = 1e-12);
    }

    #[test]
    fn test_average_comes_from_loader() {
        let file = image_file(&[image_line("img1", "1.0")]);
        let images = ImageLoader::new(0.5, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect("load images");

        assert_relative_eq!(images[0].complexity_score, 0.25);
    }

    #[test]
    fn test_extra_columns_are_accepted() {
        let line = format!("{},extra,more", image_line("img9", "0.77"));
        let file = image_file(&[line]);
        let images = ImageLoader::new(0.77, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect("load images");

        assert_eq!(images[0].image_id, "img9");
        assert_eq!(images[0].complexity_score, 0.0);
    }

    #[test]
    fn test_line_order_preserved() {
        let file = image_file(&[
            image_line("b", "0.1"),
            image_line("a", "0.2"),
            image_line("b", "0.3"),
        ]);
        let images = ImageLoader::new(0.77, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect("load images");

        let ids: Vec<_> = images.iter().map(|img| img.image_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_short_line_is_format_error() {
        let file = image_file(&[image_line("img1", "0.8"), "a,b,c".to_string()]);
        let err = ImageLoader::new(0.77, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect_err("short line");

        match err {
            NormError::Format { line, message, .. } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("at least 16"));
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_rating_is_format_error() {
        let file = image_file(&[image_line("img1", "n/a")]);
        let err = ImageLoader::new(0.77, MalformedLinePolicy::Abort)
            .load(file.path())
            .expect_err("bad rating");
        assert!(err.is_format());
    }

    #[test]
    fn test_skip_policy_keeps_good_rows() {
        let file = image_file(&[
            image_line("img1", "0.8"),
            "too,short".to_string(),
            image_line("img2", "oops"),
            image_line("img3", "0.7"),
        ]);
        let images = ImageLoader::new(0.77, MalformedLinePolicy::Skip)
            .load(file.path())
            .expect("skip malformed");

        let ids: Vec<_> = images.iter().map(|img| img.image_id.as_str()).collect();
        assert_eq!(ids, vec!["img1", "img3"]);
    }
}
