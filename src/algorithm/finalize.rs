//! Feature finalization
//!
//! Turns the joined table into model-ready rows: selects the final columns,
//! rescales percentages to 0–100 and income to thousands, and adds the
//! year offset and presidential flag. Nothing here introduces nulls, so
//! dropping incomplete rows afterwards sees exactly the nulls the joins left.

use crate::algorithm::derived::{LAND_AREA_METRIC, POPULATION_DENSITY_METRIC, POPULATION_METRIC};
use crate::algorithm::integration::IntegratedTable;
use crate::error::{EtlError, Result};
use crate::models::{DemographicsRecord, INCOME_SCALE, OutputColumn, is_presidential_year};

/// Base year of the year-offset feature
pub const BASE_YEAR: i32 = 2000;

/// Multiplier from a 0–1 share to a 0–100 percentage
pub const PERCENT_SCALE: f64 = 100.0;

/// Joined columns read by the finalizer
const SELECTED_COLUMNS: [&str; 7] = [
    "PercentBachelors",
    "Income",
    "PercentWhite",
    "AverageAge",
    POPULATION_METRIC,
    LAND_AREA_METRIC,
    POPULATION_DENSITY_METRIC,
];

fn select<'a>(table: &'a IntegratedTable, name: &str) -> Result<&'a [Option<f64>]> {
    table
        .column(name)
        .ok_or_else(|| EtlError::missing_column("joined table", name))
}

/// Build finalized rows from the joined table, one per anchor row
pub fn finalize(table: &IntegratedTable) -> Result<Vec<DemographicsRecord>> {
    let [bachelors, income, white, age, population, land_area, density] = {
        let mut selected = [&[][..]; 7];
        for (slot, name) in selected.iter_mut().zip(SELECTED_COLUMNS) {
            *slot = select(table, name)?;
        }
        selected
    };

    let records = table
        .facts()
        .iter()
        .enumerate()
        .map(|(i, fact)| DemographicsRecord {
            state: fact.state.clone(),
            year: fact.year,
            years_since_2000: fact.year - BASE_YEAR,
            total_ballots: fact.total_ballots,
            percent_voting_eligible: fact.percent_voting_eligible.map(|v| v * PERCENT_SCALE),
            percent_bachelors: bachelors[i],
            income: income[i].map(|v| v / INCOME_SCALE),
            percent_white: white[i].map(|v| v * PERCENT_SCALE),
            average_age: age[i],
            population: population[i],
            land_area: land_area[i],
            population_density: density[i],
            presidential: is_presidential_year(fact.year),
        })
        .collect::<Vec<_>>();

    log::info!("Finalized {} rows", records.len());
    Ok(records)
}

/// Keep rows with a value in every required column; returns the kept rows and the drop count
#[must_use]
pub fn drop_incomplete(
    rows: Vec<DemographicsRecord>,
    required: &[OutputColumn],
) -> (Vec<DemographicsRecord>, usize) {
    let before = rows.len();
    let kept: Vec<_> = rows
        .into_iter()
        .filter(|row| row.is_complete(required))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateKeyPolicy;
    use crate::algorithm::integration::join_sources;
    use crate::models::{ElectionFact, StateYear};
    use crate::normalize::NormalizedSource;

    fn joined(with_education: bool) -> IntegratedTable {
        let facts = vec![
            ElectionFact::new("Ohio", 2016, Some(1_000_000), Some(2_000_000), Some(2_500_000)),
            ElectionFact::new("Ohio", 2018, Some(800_000), Some(2_000_000), Some(2_500_000)),
        ];
        let mut sources = Vec::new();
        for (metric, value) in [
            ("PercentBachelors", 27.5),
            ("Income", 56_111.0),
            ("PercentWhite", 0.78),
            ("AverageAge", 39.2),
            ("Population", 11_000.0),
            ("LandAreaSQM", 40_000.0),
            ("PopulationDensity", 275.0),
        ] {
            let mut source = NormalizedSource::new("test", metric, DuplicateKeyPolicy::Reject);
            if with_education || metric != "PercentBachelors" {
                source.insert(StateYear::new("Ohio", 2016), Some(value)).unwrap();
            }
            sources.push(source);
        }
        join_sources(facts, &sources).unwrap().0
    }

    #[test]
    fn test_rescales_and_derives() {
        let records = finalize(&joined(true)).unwrap();
        let ohio = &records[0];
        assert_eq!(ohio.percent_voting_eligible, Some(50.0));
        assert!((ohio.percent_white.unwrap() - 78.0).abs() < 1e-9);
        assert!((ohio.income.unwrap() - 56.111).abs() < 1e-9);
        assert_eq!(ohio.percent_bachelors, Some(27.5));
        assert_eq!(ohio.years_since_2000, 16);
        assert!(ohio.presidential);
        assert!(!records[1].presidential);
        assert_eq!(records[1].years_since_2000, 18);
    }

    #[test]
    fn test_missing_education_is_null_then_dropped() {
        let records = finalize(&joined(false)).unwrap();
        assert_eq!(records[0].percent_bachelors, None);

        let (kept, dropped) = drop_incomplete(records, &[OutputColumn::PercentBachelors]);
        assert!(kept.is_empty());
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_missing_joined_column_is_an_error() {
        let table = IntegratedTable::new(Vec::new());
        let err = finalize(&table).unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { .. }));
    }
}
