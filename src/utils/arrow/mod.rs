//! Arrow table construction for the persisted outputs

pub mod conversion;

pub use conversion::{demographics_schema, records_to_batch};
