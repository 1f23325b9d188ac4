//! Sources already laid out as one column per year

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::normalize::{NormalizeOptions, NormalizedSource, melt_by_year};
use crate::reader::{RawSourceTable, TableLayout};
use crate::registry::SourceLoader;

/// Which file of the configuration a wide source reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WideFile {
    Education,
    Income,
    Diversity,
}

/// A wide-by-year source melted into a single metric
#[derive(Debug, Clone)]
pub struct WideByYearSource {
    name: &'static str,
    file: WideFile,
    id_column: &'static str,
    metric_name: &'static str,
    skip_rows: &'static [usize],
}

impl WideByYearSource {
    #[must_use]
    pub const fn metric_name(&self) -> &'static str {
        self.metric_name
    }
}

/// Education: `Name` plus one column per year
#[must_use]
pub const fn education() -> WideByYearSource {
    WideByYearSource {
        name: "education",
        file: WideFile::Education,
        id_column: "Name",
        metric_name: "PercentBachelors",
        skip_rows: &[],
    }
}

/// Income: `Name` plus one column per year, with a units row under the header
#[must_use]
pub const fn income() -> WideByYearSource {
    WideByYearSource {
        name: "income",
        file: WideFile::Income,
        id_column: "Name",
        metric_name: "Income",
        skip_rows: &[1],
    }
}

/// Diversity: `Location` plus `YYYY__White` columns, national row under the header
#[must_use]
pub const fn diversity() -> WideByYearSource {
    WideByYearSource {
        name: "diversity",
        file: WideFile::Diversity,
        id_column: "Location",
        metric_name: "PercentWhite",
        skip_rows: &[1],
    }
}

impl SourceLoader for WideByYearSource {
    fn source_name(&self) -> &'static str {
        self.name
    }

    fn file_name<'a>(&self, config: &'a PipelineConfig) -> &'a str {
        match self.file {
            WideFile::Education => &config.files.education,
            WideFile::Income => &config.files.income,
            WideFile::Diversity => &config.files.diversity,
        }
    }

    fn layout(&self) -> TableLayout {
        TableLayout::skipping(self.skip_rows)
    }

    fn normalize(
        &self,
        table: &RawSourceTable,
        config: &PipelineConfig,
    ) -> Result<Vec<NormalizedSource>> {
        let options = NormalizeOptions::from_config(config);
        Ok(vec![melt_by_year(
            table,
            self.id_column,
            self.metric_name,
            &options,
        )?])
    }
}
