//! Error handling for the turnout ETL pipeline.
//!
//! Only fatal conditions are represented here. Cells that fail numeric
//! coercion are recorded as [`crate::normalize::ParseIssue`] values and
//! become nulls, and rows missing a required field are counted and dropped
//! by the partitioner rather than reported as errors.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    /// An input file is missing or unreadable
    #[error("Source unavailable ({purpose}): {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        purpose: String,
        #[source]
        source: io::Error,
    },

    /// A file could not be tokenised as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A source layout lacks a column it must provide
    #[error("Source '{source_name}' is missing column '{column}'")]
    MissingColumn { source_name: String, column: String },

    /// Nothing was left to use as a header after skipping layout rows
    #[error("Source '{source_name}' has no header row")]
    EmptySource { source_name: String },

    /// A normalized source produced two records for the same key
    #[error("Duplicate key in source '{source_name}': ({location}, {year})")]
    JoinKeyViolation {
        source_name: String,
        location: String,
        year: i32,
    },

    /// A static (location-only) table lists the same location twice
    #[error("Duplicate location in source '{source_name}': {location}")]
    DuplicateLocation {
        source_name: String,
        location: String,
    },

    /// A join would add a column that already exists on the accumulated table
    #[error("Column '{0}' already exists on the joined table")]
    DuplicateColumn(String),

    /// Arrow error while materialising an output table
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error while persisting an output table
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// IO error outside of source reading (output directory, output files)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EtlError {
    /// Shorthand for a missing-column error
    pub fn missing_column(source_name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            source_name: source_name.into(),
            column: column.into(),
        }
    }

    /// Whether the error is a key-uniqueness violation
    #[must_use]
    pub const fn is_join_key_violation(&self) -> bool {
        matches!(
            self,
            Self::JoinKeyViolation { .. } | Self::DuplicateLocation { .. }
        )
    }

    /// Whether the error was caused by an unreadable or missing input
    #[must_use]
    pub const fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, EtlError>;
