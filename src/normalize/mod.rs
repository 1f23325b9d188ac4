//! Source normalization
//!
//! Converts raw wide tables into keyed long-format sources. The reshape and
//! parsing primitives live here; the per-source layouts are in
//! [`crate::registry`].

pub mod melt;
pub mod parse;
pub mod source;

pub use melt::melt_by_year;
pub use parse::{CellValue, ParseIssue, leading_year, parse_count, parse_number, split_year_label};
pub use source::{CellParser, NormalizedSource};

use crate::config::{DuplicateKeyPolicy, PipelineConfig};

/// Options shared by every source normalizer
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub duplicate_key_policy: DuplicateKeyPolicy,
    pub excluded_locations: Vec<String>,
}

impl NormalizeOptions {
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            duplicate_key_policy: config.duplicate_key_policy,
            excluded_locations: config.excluded_locations.clone(),
        }
    }

    #[must_use]
    pub fn is_excluded(&self, location: &str) -> bool {
        self.excluded_locations.iter().any(|l| l == location)
    }
}
