//! Utility functions for logging, Arrow conversion and output files

pub mod arrow;
pub mod io;
pub mod logging;

pub use self::arrow::{demographics_schema, records_to_batch};
pub use self::io::{write_csv, write_parquet};
