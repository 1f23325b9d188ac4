//! Derived metrics computed from the columns of a single source
//!
//! All functions here are pure. Division by a zero or missing denominator
//! yields `None`, never an error.

use crate::config::DuplicateKeyPolicy;
use crate::error::Result;
use crate::normalize::NormalizedSource;
use crate::registry::area::LandAreaTable;

/// Age bands of the age source with the representative age used for each
pub const AGE_BANDS: [(&str, f64); 6] = [
    ("Children 0-18", 9.0),
    ("Adults 19-25", 22.0),
    ("Adults 26-34", 30.0),
    ("Adults 35-54", 45.0),
    ("Adults 55-64", 60.0),
    ("65+", 75.0),
];

/// Label of the per-year population total in the age source
pub const AGE_TOTAL_LABEL: &str = "Total";

/// Metric names of the population-density source
pub const POPULATION_METRIC: &str = "Population";
pub const LAND_AREA_METRIC: &str = "LandAreaSQM";
pub const POPULATION_DENSITY_METRIC: &str = "PopulationDensity";

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Share of a population that cast a ballot, 0–1 scale
#[must_use]
pub fn turnout_percentage(total_ballots: Option<i64>, population: Option<i64>) -> Option<f64> {
    ratio(total_ballots? as f64, population? as f64)
}

/// Population-weighted average age from the six band counts.
///
/// `total` is the source's own population total. Pass `None` only when the
/// source has no total column; the band counts are then summed instead.
#[must_use]
pub fn weighted_average_age(band_counts: &[f64; 6], total: Option<f64>) -> Option<f64> {
    let weighted: f64 = band_counts
        .iter()
        .zip(AGE_BANDS.iter())
        .map(|(count, (_, midpoint))| count * midpoint)
        .sum();
    let total = total.unwrap_or_else(|| band_counts.iter().sum());
    ratio(weighted, total)
}

/// People per 1000 square miles of land area
#[must_use]
pub fn population_density(population: Option<f64>, land_area_sq_mi: Option<f64>) -> Option<f64> {
    ratio(1000.0 * population?, land_area_sq_mi?)
}

/// Combine a yearly population source with the static land-area table.
///
/// Returns the `Population`, `LandAreaSQM` and `PopulationDensity` sources.
/// Area and density are only present for locations found in the area table;
/// the area is matched on location alone since it does not vary by year.
pub fn density_sources(
    population: &NormalizedSource,
    areas: &LandAreaTable,
    policy: DuplicateKeyPolicy,
) -> Result<[NormalizedSource; 3]> {
    let source_name = population.source_name();
    let mut population_out = NormalizedSource::new(source_name, POPULATION_METRIC, policy);
    let mut area_out = NormalizedSource::new(source_name, LAND_AREA_METRIC, policy);
    let mut density_out = NormalizedSource::new(source_name, POPULATION_DENSITY_METRIC, policy);

    let mut without_area = 0usize;
    for key in population.keys() {
        let people = population.get(key).flatten();
        population_out.insert(key.clone(), people)?;

        match areas.get(&key.location) {
            Some(area) => {
                area_out.insert(key.clone(), area)?;
                density_out.insert(key.clone(), population_density(people, area))?;
            }
            None => without_area += 1,
        }
    }

    if without_area > 0 {
        log::warn!("{without_area} population record(s) have no land-area match");
    }

    population_out.extend_issues(population.parse_issues().iter().cloned());
    Ok([population_out, area_out, density_out])
}
