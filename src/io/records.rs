//! Delimited record reading shared by the rate and image loaders.
//!
//! Both input tables are headerless, comma-separated, with no quoting. Each
//! file is opened, read to the end, and closed before the caller moves on;
//! the handle is dropped on every exit path including parse failures.
//!
//! Lines are counted here rather than by the csv reader so that reported
//! line numbers include the blank lines that are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::core::config::MalformedLinePolicy;
use crate::core::errors::{NormError, Result};

/// Field delimiter of both input tables.
pub const DELIMITER: char = ',';

/// Counters collected while reading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    /// Records handed to the visitor successfully
    pub accepted: usize,
    /// Malformed records dropped under [`MalformedLinePolicy::Skip`]
    pub skipped: usize,
}

/// Split one line into fields.
///
/// Every delimiter separates fields; quotes are ordinary characters. Trailing
/// empty fields are dropped, so `img1,0.9,` has two fields.
pub fn split_record(line: &str) -> StringRecord {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    StringRecord::from(fields)
}

/// Parse a numeric field, trimming surrounding whitespace first.
pub fn parse_number(raw: &str, field: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| NormError::format(format!("Field '{field}' is not a number ({raw:?}): {e}")))
}

/// Read every non-blank line of `path` and hand its record to `visit`.
///
/// Format errors, from decoding or from `visit`, are either fatal or logged
/// and skipped depending on `policy`. I/O errors are always fatal.
pub fn visit_records<F>(path: &Path, policy: MalformedLinePolicy, mut visit: F) -> Result<RecordStats>
where
    F: FnMut(&StringRecord) -> Result<()>,
{
    let display = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| NormError::io(format!("Failed to open {display}"), e))?;

    let mut stats = RecordStats::default();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_no = index as u64 + 1;
        let outcome = match line {
            Ok(line) => {
                let line = line.strip_suffix('\r').unwrap_or(&line);
                if line.is_empty() {
                    continue;
                }
                visit(&split_record(line)).map_err(|e| e.at_location(&display, Some(line_no)))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(NormError::format_at(
                format!("Line is not valid UTF-8: {e}"),
                &display,
                Some(line_no),
            )),
            Err(e) => {
                return Err(NormError::io(
                    format!("Failed to read {display} at line {line_no}"),
                    e,
                ));
            }
        };

        match outcome {
            Ok(()) => stats.accepted += 1,
            Err(err) if err.is_format() && policy == MalformedLinePolicy::Skip => {
                warn!("Skipping malformed line: {err}");
                stats.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_lines(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
        file
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let file = write_lines(&["a,1", "", "b,2"]);
        let mut seen = Vec::new();
        let stats = visit_records(file.path(), MalformedLinePolicy::Abort, |record| {
            seen.push(record.get(0).unwrap_or_default().to_string());
            Ok(())
        })
        .expect("read records");

        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(stats.accepted, 2);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let file = write_lines(&["a,0.9", "", "", "b"]);
        let err = visit_records(file.path(), MalformedLinePolicy::Abort, |record| {
            if record.len() != 2 {
                return Err(NormError::format("wrong width"));
            }
            Ok(())
        })
        .expect_err("short record");

        assert!(matches!(err, NormError::Format { line: Some(4), .. }));
    }

    #[test]
    fn test_trailing_empty_fields_are_dropped() {
        assert_eq!(split_record("img1,0.9,").len(), 2);
        assert_eq!(split_record("img1,0.9,,,").len(), 2);
        assert_eq!(split_record("img1,,0.9").len(), 3);
        assert_eq!(split_record("img1").len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"a,0.9\n\xff\xfe,1\n").expect("write bytes");

        let err = visit_records(file.path(), MalformedLinePolicy::Abort, |_| Ok(()))
            .expect_err("bad encoding");
        assert!(matches!(err, NormError::Format { line: Some(2), .. }));
    }

    #[test]
    fn test_quotes_are_not_special() {
        let file = write_lines(&["\"a,b\",1"]);
        let mut widths = Vec::new();
        visit_records(file.path(), MalformedLinePolicy::Abort, |record| {
            widths.push(record.len());
            Ok(())
        })
        .expect("read records");

        assert_eq!(widths, vec![3]);
    }

    #[test]
    fn test_abort_reports_file_and_line() {
        let file = write_lines(&["ok", "bad", "ok"]);
        let err = visit_records(file.path(), MalformedLinePolicy::Abort, |record| {
            if record.get(0) == Some("bad") {
                return Err(NormError::format("rejected"));
            }
            Ok(())
        })
        .expect_err("should abort");

        match err {
            NormError::Format {
                file_path, line, ..
            } => {
                assert_eq!(file_path, Some(file.path().display().to_string()));
                assert_eq!(line, Some(2));
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_counts_rejected_records() {
        let file = write_lines(&["ok", "bad", "ok"]);
        let stats = visit_records(file.path(), MalformedLinePolicy::Skip, |record| {
            if record.get(0) == Some("bad") {
                return Err(NormError::format("rejected"));
            }
            Ok(())
        })
        .expect("skip policy");

        assert_eq!(stats, RecordStats { accepted: 2, skipped: 1 });
    }

    #[test]
    fn test_skip_does_not_swallow_other_errors() {
        let file = write_lines(&["x"]);
        let err = visit_records(file.path(), MalformedLinePolicy::Skip, |_| {
            Err(NormError::validation_field("not a format problem", "test"))
        })
        .expect_err("validation errors propagate");
        assert!(matches!(err, NormError::Validation { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = visit_records(&dir.path().join("nope.csv"), MalformedLinePolicy::Skip, |_| Ok(()))
            .expect_err("missing file");
        assert!(matches!(err, NormError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_parse_number_trims_whitespace() {
        assert_eq!(parse_number(" 0.5 ", "rate").expect("parse"), 0.5);
        let err = parse_number("abc", "rate").expect_err("not a number");
        assert!(err.to_string().contains("'rate'"));
    }
}
