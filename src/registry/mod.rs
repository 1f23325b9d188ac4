//! Source definitions and loaders for the election and demographic datasets
//!
//! Each source file has its own layout and needs its own normalizer. The
//! election results are the anchor table and are loaded separately by
//! [`election::load_election_table`]; every other source implements
//! [`SourceLoader`] and yields one [`NormalizedSource`] per column it adds to
//! the joined table.
//!
//! Available sources:
//! - Election: one results file per election year (anchor)
//! - Education: share of adults holding a bachelor's degree
//! - Income: median household income
//! - Diversity: share of the population that is white
//! - Age: population counts by age band, reduced to an average age
//! - Population: yearly population, combined with static land area into density
//! - Area: static land area per location

pub mod age;
pub mod area;
pub mod election;
pub mod factory;
pub mod population;
pub mod wide;

use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::normalize::NormalizedSource;
use crate::reader::{RawSourceTable, TableLayout, read_raw_table};

pub use election::{ElectionTable, load_election_table};
pub use factory::{auxiliary_sources, source_from_name};

/// Base trait for auxiliary source loaders
pub trait SourceLoader {
    /// Name of the source, used in diagnostics and errors
    fn source_name(&self) -> &'static str;

    /// File name of the source relative to the data directory
    fn file_name<'a>(&self, config: &'a PipelineConfig) -> &'a str;

    /// Rows dropped before the header
    fn layout(&self) -> TableLayout;

    /// Normalize a raw table into the sources it contributes to the join
    fn normalize(
        &self,
        table: &RawSourceTable,
        config: &PipelineConfig,
    ) -> Result<Vec<NormalizedSource>>;

    /// Path of the source file
    fn path(&self, config: &PipelineConfig) -> PathBuf {
        config.data_path(self.file_name(config))
    }

    /// Read and normalize the source file
    fn load(&self, config: &PipelineConfig) -> Result<Vec<NormalizedSource>> {
        let table = read_raw_table(&self.path(config), self.source_name(), &self.layout())?;
        self.normalize(&table, config)
    }
}
