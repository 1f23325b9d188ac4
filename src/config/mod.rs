//! Configuration for the turnout pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Deserialize;

use crate::error::{EtlError, Result};
use crate::error::util::open_source;

/// What to do when a normalized source yields the same `(location, year)` twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Abort the run with a join key violation
    #[default]
    Reject,
    /// Keep the first record seen for the key and ignore later ones
    KeepFirst,
}

/// Input file names, relative to the data directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    /// Pattern for the per-year election files; `{year}` is substituted
    pub election_pattern: String,
    pub education: String,
    pub income: String,
    pub diversity: String,
    pub age: String,
    pub population: String,
    pub area: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            election_pattern: "election_{year}.csv".to_string(),
            education: "education.csv".to_string(),
            income: "income.csv".to_string(),
            diversity: "diversity.csv".to_string(),
            age: "age.csv".to_string(),
            population: "population.csv".to_string(),
            area: "area.csv".to_string(),
        }
    }
}

impl SourceFiles {
    /// File name of the election results for one year
    #[must_use]
    pub fn election_file(&self, year: i32) -> String {
        self.election_pattern.replace("{year}", &year.to_string())
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the raw CSV sources
    pub data_dir: PathBuf,
    /// Directory the finalized tables are written to
    pub output_dir: PathBuf,
    /// Election years with one results file each
    pub election_years: Vec<i32>,
    /// Number of locations expected per election year (sanity check only)
    pub expected_states: usize,
    /// Locations removed from every auxiliary source
    pub excluded_locations: Vec<String>,
    /// Policy for duplicate keys within a normalized source
    pub duplicate_key_policy: DuplicateKeyPolicy,
    /// Input file names
    pub files: SourceFiles,
    /// Also write each output table as Parquet
    pub write_parquet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("data"),
            election_years: (2000..=2022).step_by(2).collect(),
            expected_states: 51,
            excluded_locations: vec!["Puerto Rico".to_string()],
            duplicate_key_policy: DuplicateKeyPolicy::Reject,
            files: SourceFiles::default(),
            write_parquet: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = open_source(path, "pipeline configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.election_years.is_empty() {
            return Err(EtlError::Config("no election years configured".to_string()));
        }
        if !self.files.election_pattern.contains("{year}") {
            return Err(EtlError::Config(format!(
                "election file pattern '{}' has no {{year}} placeholder",
                self.files.election_pattern
            )));
        }
        if let Some(year) = self.election_years.iter().duplicates().next() {
            return Err(EtlError::Config(format!(
                "election year {year} is listed more than once"
            )));
        }
        Ok(())
    }

    /// Full path of a data file
    #[must_use]
    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Whether a location is excluded from auxiliary sources
    #[must_use]
    pub fn is_excluded(&self, location: &str) -> bool {
        self.excluded_locations.iter().any(|l| l == location)
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Data Directory: {}", self.data_dir.display())?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        writeln!(
            f,
            "  Election Years: {}",
            self.election_years.iter().join(", ")
        )?;
        writeln!(f, "  Expected States: {}", self.expected_states)?;
        if !self.excluded_locations.is_empty() {
            writeln!(
                f,
                "  Excluded Locations: {}",
                self.excluded_locations.join(", ")
            )?;
        }
        writeln!(f, "  Duplicate Keys: {:?}", self.duplicate_key_policy)?;
        writeln!(f, "  Write Parquet: {}", self.write_parquet)?;
        Ok(())
    }
}
