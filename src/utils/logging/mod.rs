//! Logging utilities for pipeline operations

pub mod log;

pub use self::log::{log_empty_source, log_lossy_cells, log_source_read, log_table_written};
