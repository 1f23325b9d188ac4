//! Finalized demographics rows and the output column contract
//!
//! [`OUTPUT_COLUMNS`] fixes the header names and their order in every
//! persisted table. Downstream consumers (model training and the inference
//! service) select columns by these names, so the order and spelling here are
//! part of the public interface.

use std::fmt;

/// A column of the persisted demographics tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputColumn {
    State,
    Year,
    YearsSince2000,
    TotalBallots,
    PercentVotingEligibleVotes,
    PercentBachelors,
    Income,
    PercentWhite,
    AverageAge,
    Population,
    LandAreaSqm,
    PopulationDensity,
    Presidential,
}

/// Column order of every output table
pub const OUTPUT_COLUMNS: [OutputColumn; 13] = [
    OutputColumn::State,
    OutputColumn::Year,
    OutputColumn::YearsSince2000,
    OutputColumn::TotalBallots,
    OutputColumn::PercentVotingEligibleVotes,
    OutputColumn::PercentBachelors,
    OutputColumn::Income,
    OutputColumn::PercentWhite,
    OutputColumn::AverageAge,
    OutputColumn::Population,
    OutputColumn::LandAreaSqm,
    OutputColumn::PopulationDensity,
    OutputColumn::Presidential,
];

impl OutputColumn {
    /// Header name as written to the output files
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::Year => "Year",
            Self::YearsSince2000 => "YearsSince2000",
            Self::TotalBallots => "TotalBallots",
            Self::PercentVotingEligibleVotes => "PercentVotingEligibleVotes",
            Self::PercentBachelors => "PercentBachelors",
            Self::Income => "Income",
            Self::PercentWhite => "PercentWhite",
            Self::AverageAge => "AverageAge",
            Self::Population => "Population",
            Self::LandAreaSqm => "LandAreaSQM",
            Self::PopulationDensity => "PopulationDensity",
            Self::Presidential => "Presidential",
        }
    }

    /// Look up a column by its header name
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        OUTPUT_COLUMNS.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for OutputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Whether a year is treated as a presidential election year.
///
/// This is the `year % 4 == 0` calendar rule, not a list of actual election
/// years. Downstream models were trained against exactly this rule.
#[must_use]
pub const fn is_presidential_year(year: i32) -> bool {
    year % 4 == 0
}

/// One finalized, model-ready row
///
/// Percentages are on a 0–100 scale and income is in thousands. Value fields
/// stay optional until the partitioner drops rows missing required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicsRecord {
    pub state: String,
    pub year: i32,
    pub years_since_2000: i32,
    pub total_ballots: Option<i64>,
    pub percent_voting_eligible: Option<f64>,
    pub percent_bachelors: Option<f64>,
    pub income: Option<f64>,
    pub percent_white: Option<f64>,
    pub average_age: Option<f64>,
    pub population: Option<f64>,
    pub land_area: Option<f64>,
    pub population_density: Option<f64>,
    pub presidential: bool,
}

impl DemographicsRecord {
    /// Integer coding of the presidential flag used by the partitions and outputs
    #[must_use]
    pub const fn presidential_code(&self) -> i64 {
        if self.presidential { 1 } else { 0 }
    }

    /// Whether the given column holds a value in this row
    #[must_use]
    pub fn has_value(&self, column: OutputColumn) -> bool {
        match column {
            OutputColumn::State => !self.state.is_empty(),
            OutputColumn::Year | OutputColumn::YearsSince2000 | OutputColumn::Presidential => true,
            OutputColumn::TotalBallots => self.total_ballots.is_some(),
            OutputColumn::PercentVotingEligibleVotes => self.percent_voting_eligible.is_some(),
            OutputColumn::PercentBachelors => self.percent_bachelors.is_some(),
            OutputColumn::Income => self.income.is_some(),
            OutputColumn::PercentWhite => self.percent_white.is_some(),
            OutputColumn::AverageAge => self.average_age.is_some(),
            OutputColumn::Population => self.population.is_some(),
            OutputColumn::LandAreaSqm => self.land_area.is_some(),
            OutputColumn::PopulationDensity => self.population_density.is_some(),
        }
    }

    /// Whether every listed column holds a value
    #[must_use]
    pub fn is_complete(&self, required: &[OutputColumn]) -> bool {
        required.iter().all(|&column| self.has_value(column))
    }
}
