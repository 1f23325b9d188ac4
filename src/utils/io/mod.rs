//! Output writers for finalized tables

pub mod csv;
pub mod parquet;

pub use self::csv::write_csv;
pub use self::parquet::write_parquet;
