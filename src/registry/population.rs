//! Population source, combined with land area into population density

use crate::algorithm::derived::{POPULATION_METRIC, density_sources};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::normalize::{NormalizeOptions, NormalizedSource, melt_by_year};
use crate::reader::{RawSourceTable, TableLayout};
use crate::registry::SourceLoader;
use crate::registry::area::LandAreaTable;

pub const ID_COLUMN: &str = "Name";

/// Yearly population plus the static area table.
///
/// Contributes three joined columns: population, land area and density.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationDensitySource;

impl PopulationDensitySource {
    /// Normalize the population table against an already loaded area table
    pub fn normalize_with_areas(
        table: &RawSourceTable,
        areas: &LandAreaTable,
        config: &PipelineConfig,
    ) -> Result<Vec<NormalizedSource>> {
        let options = NormalizeOptions::from_config(config);
        let population = melt_by_year(table, ID_COLUMN, POPULATION_METRIC, &options)?;
        let [population, mut area, density] =
            density_sources(&population, areas, options.duplicate_key_policy)?;
        area.extend_issues(areas.parse_issues().iter().cloned());
        Ok(vec![population, area, density])
    }
}

impl SourceLoader for PopulationDensitySource {
    fn source_name(&self) -> &'static str {
        "population"
    }

    fn file_name<'a>(&self, config: &'a PipelineConfig) -> &'a str {
        &config.files.population
    }

    fn layout(&self) -> TableLayout {
        TableLayout::default()
    }

    fn normalize(
        &self,
        table: &RawSourceTable,
        config: &PipelineConfig,
    ) -> Result<Vec<NormalizedSource>> {
        let areas = LandAreaTable::load(config)?;
        Self::normalize_with_areas(table, &areas, config)
    }
}
