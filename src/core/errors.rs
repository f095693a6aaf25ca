//! Error types for the success-norm library.
//!
//! Loaders, the normaliser and the configuration layer all report failures
//! through [`NormError`]. Variants are structured so the binary can print a
//! precise message (file, line, image identifier) without re-parsing text.

use std::io;

use thiserror::Error;

/// Main result type for success-norm operations.
pub type Result<T> = std::result::Result<T, NormError>;

/// Error type for every stage of the normalisation pipeline.
#[derive(Error, Debug)]
pub enum NormError {
    /// Input file missing, unreadable, or output not writable
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A line does not match the expected shape or a field is not numeric
    #[error("Format error{}: {message}", location_suffix(.file_path, .line))]
    Format {
        /// Error description
        message: String,
        /// File being read when the error occurred
        file_path: Option<String>,
        /// 1-based line number (if available)
        line: Option<u64>,
    },

    /// Zero summed complexity for a rated image (division by zero)
    #[error("Degenerate input for image '{image_id}': {message}")]
    Degenerate {
        /// Identifier from the rate table
        image_id: String,
        /// Error description
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Configuration value outside its accepted range
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field that failed validation
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn location_suffix(file_path: &Option<String>, line: &Option<u64>) -> String {
    match (file_path, line) {
        (Some(path), Some(line)) => format!(" in {path}:{line}"),
        (Some(path), None) => format!(" in {path}"),
        (None, Some(line)) => format!(" at line {line}"),
        (None, None) => String::new(),
    }
}

impl NormError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new format error without location
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            file_path: None,
            line: None,
        }
    }

    /// Create a new format error pointing at a file and line
    pub fn format_at(
        message: impl Into<String>,
        file_path: impl Into<String>,
        line: Option<u64>,
    ) -> Self {
        Self::Format {
            message: message.into(),
            file_path: Some(file_path.into()),
            line,
        }
    }

    /// Create a new degenerate-input error
    pub fn degenerate(image_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Degenerate {
            image_id: image_id.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Attach file and line to a format error that has none yet.
    pub fn at_location(mut self, path: impl Into<String>, at_line: Option<u64>) -> Self {
        if let Self::Format {
            file_path, line, ..
        } = &mut self
        {
            if file_path.is_none() {
                *file_path = Some(path.into());
            }
            if line.is_none() {
                *line = at_line;
            }
        }
        self
    }

    /// True when the error came from malformed input rather than I/O.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

impl From<io::Error> for NormError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_yaml::Error> for NormError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for NormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}
