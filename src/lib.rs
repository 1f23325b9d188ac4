//! A Rust library for reshaping and joining U.S. state-level election and
//! demographic sources into a model-ready turnout table.
//!
//! Sources are normalized from their wide layouts into keyed long-format
//! records, left-joined onto the election results by `(state, year)`,
//! finalized into rescaled features and split into full, presidential and
//! midterm tables.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod registry;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{DuplicateKeyPolicy, PipelineConfig};
pub use error::{EtlError, Result};
pub use models::{
    DemographicsRecord, ElectionFact, FeatureRequest, FeatureVector, MODEL_INPUT_COLUMNS,
    MODEL_TARGET_COLUMN, NormalizedRecord, OUTPUT_COLUMNS, OutputColumn, StateYear,
};
pub use normalize::{NormalizedSource, ParseIssue};
pub use pipeline::{PipelineReport, build_partitions, run_pipeline};

// Arrow types
pub use arrow::record_batch::RecordBatch;
