//! Error types for dprose conversion
//!
//! Every failure is fatal: errors carry enough context (path, line number,
//! offending id) for the user to fix the input and re-run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dprose operations
pub type Result<T> = std::result::Result<T, DproseError>;

/// Main error type for dprose
#[derive(Error, Debug)]
pub enum DproseError {
    /// A required column is absent from the metadata header
    #[error("Metadata file '{}' is missing required column '{column}'", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// The metadata table could not be parsed
    #[error("Malformed metadata file '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record line is not a JSON object
    #[error("Invalid JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record has no `dprose_id` key
    #[error("Record on line {line} has no 'dprose_id' field")]
    MissingRecordId { line: usize },

    /// `dprose_id` is neither a string nor a number
    #[error("Record on line {line} has an unusable 'dprose_id': {value}")]
    InvalidRecordId { line: usize, value: String },

    /// A record references an id with no metadata row
    #[error("Record on line {line} has id '{id}' which does not appear in the metadata")]
    UnknownId { id: String, line: usize },

    /// Reading or writing a file failed
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output document could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DproseError {
    /// Create an IO error tagged with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }
}
