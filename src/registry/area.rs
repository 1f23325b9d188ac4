//! Static land area per location

use rustc_hash::FxHashMap;

use crate::config::{DuplicateKeyPolicy, PipelineConfig};
use crate::error::{EtlError, Result};
use crate::normalize::{CellParser, NormalizeOptions, ParseIssue};
use crate::reader::{RawSourceTable, TableLayout, read_raw_table};

pub const ID_COLUMN: &str = "State";
pub const AREA_COLUMN: &str = "LandAreaSQM";

/// Land area in square miles keyed by location only
#[derive(Debug, Clone, Default)]
pub struct LandAreaTable {
    areas: FxHashMap<String, Option<f64>>,
    parse_issues: Vec<ParseIssue>,
}

impl LandAreaTable {
    /// Build a table from `(location, area)` pairs; later pairs overwrite earlier ones
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Option<f64>)>) -> Self {
        Self {
            areas: pairs.into_iter().collect(),
            parse_issues: Vec::new(),
        }
    }

    /// Area of a location: `None` if unknown, `Some(None)` if listed without a value
    #[must_use]
    pub fn get(&self, location: &str) -> Option<Option<f64>> {
        self.areas.get(location).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    #[must_use]
    pub fn parse_issues(&self) -> &[ParseIssue] {
        &self.parse_issues
    }

    /// Normalize the raw area table
    pub fn from_raw(table: &RawSourceTable, options: &NormalizeOptions) -> Result<Self> {
        let id_idx = table.column_index(ID_COLUMN)?;
        let area_idx = table.column_index(AREA_COLUMN)?;

        let mut parser = CellParser::new(&table.name);
        let mut areas = FxHashMap::default();

        for row in &table.rows {
            let location = row[id_idx].as_str();
            if location.is_empty() || options.is_excluded(location) {
                continue;
            }
            let area = parser.number(location, AREA_COLUMN, &row[area_idx]);
            if areas.contains_key(location) {
                match options.duplicate_key_policy {
                    DuplicateKeyPolicy::Reject => {
                        return Err(EtlError::DuplicateLocation {
                            source_name: table.name.clone(),
                            location: location.to_string(),
                        });
                    }
                    DuplicateKeyPolicy::KeepFirst => continue,
                }
            }
            areas.insert(location.to_string(), area);
        }

        Ok(Self {
            areas,
            parse_issues: parser.into_issues(),
        })
    }

    /// Read and normalize the configured area file
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let path = config.data_path(&config.files.area);
        let table = read_raw_table(&path, "area", &TableLayout::default())?;
        let areas = Self::from_raw(&table, &NormalizeOptions::from_config(config))?;
        log::info!("Loaded land area for {} location(s)", areas.len());
        Ok(areas)
    }
}
