//! Age source: population counts by age band, reduced to an average age
//!
//! Headers are `YYYY__<band>` plus `YYYY__Total`. A year contributes records
//! only when all six band columns exist for it; other years are left out of
//! the normalized output entirely rather than emitted as nulls. The band sum
//! stands in for the total only when the file has no Total column for that
//! year; a blank or unparseable Total cell makes the average null.

use std::collections::BTreeMap;

use crate::algorithm::derived::{AGE_BANDS, AGE_TOTAL_LABEL, weighted_average_age};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::StateYear;
use crate::normalize::{CellParser, NormalizeOptions, NormalizedSource, split_year_label};
use crate::reader::{RawSourceTable, TableLayout};
use crate::registry::SourceLoader;

pub const ID_COLUMN: &str = "Location";
pub const METRIC: &str = "AverageAge";

/// Column positions of one year's bands
#[derive(Debug, Clone, Default)]
struct YearColumns {
    bands: [Option<usize>; 6],
    total: Option<usize>,
}

impl YearColumns {
    fn complete_bands(&self) -> Option<[usize; 6]> {
        let mut out = [0usize; 6];
        for (slot, band) in out.iter_mut().zip(self.bands.iter()) {
            *slot = (*band)?;
        }
        Some(out)
    }
}

/// Loader for the age-band population source
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeSource;

impl AgeSource {
    /// Years with a full set of band columns, with their column positions
    fn complete_years(table: &RawSourceTable) -> BTreeMap<i32, ([usize; 6], Option<usize>)> {
        let mut by_year: BTreeMap<i32, YearColumns> = BTreeMap::new();

        for (idx, header) in table.headers.iter().enumerate() {
            let Some((year, label)) = split_year_label(header) else {
                continue;
            };
            let columns = by_year.entry(year).or_default();
            if label == AGE_TOTAL_LABEL {
                columns.total = Some(idx);
            } else if let Some(band) = AGE_BANDS.iter().position(|(name, _)| *name == label) {
                columns.bands[band] = Some(idx);
            }
        }

        by_year
            .into_iter()
            .filter_map(|(year, columns)| match columns.complete_bands() {
                Some(bands) => Some((year, (bands, columns.total))),
                None => {
                    log::debug!("age: year {year} lacks one or more age bands, skipping");
                    None
                }
            })
            .collect()
    }
}

impl SourceLoader for AgeSource {
    fn source_name(&self) -> &'static str {
        "age"
    }

    fn file_name<'a>(&self, config: &'a PipelineConfig) -> &'a str {
        &config.files.age
    }

    fn layout(&self) -> TableLayout {
        TableLayout::skipping(&[0, 1, 3])
    }

    fn normalize(
        &self,
        table: &RawSourceTable,
        config: &PipelineConfig,
    ) -> Result<Vec<NormalizedSource>> {
        let options = NormalizeOptions::from_config(config);
        let id_idx = table.column_index(ID_COLUMN)?;
        let years = Self::complete_years(table);

        let mut source = NormalizedSource::new(&table.name, METRIC, options.duplicate_key_policy);
        let mut parser = CellParser::new(&table.name);

        for row in &table.rows {
            let location = row[id_idx].as_str();
            if location.is_empty() || options.is_excluded(location) {
                continue;
            }

            for (&year, (bands, total)) in &years {
                let mut counts = [0.0; 6];
                let mut complete = true;
                for (count, &idx) in counts.iter_mut().zip(bands.iter()) {
                    match parser.number(location, &table.headers[idx], &row[idx]) {
                        Some(v) => *count = v,
                        None => complete = false,
                    }
                }
                // a Total column without a usable cell nulls the average
                let total = match total {
                    Some(idx) => match parser.number(location, &table.headers[*idx], &row[*idx]) {
                        Some(total) => Some(total),
                        None => {
                            complete = false;
                            None
                        }
                    },
                    None => None,
                };

                let average = if complete {
                    weighted_average_age(&counts, total)
                } else {
                    None
                };
                source.insert(StateYear::new(location, year), average)?;
            }
        }

        source.extend_issues(parser.into_issues());
        log::info!(
            "Normalized {} into {} {} records over {} year(s)",
            table.name,
            source.len(),
            METRIC,
            years.len()
        );
        Ok(vec![source])
    }
}
