use turnout_etl::StateYear;
use turnout_etl::registry::age::AgeSource;
use turnout_etl::registry::population::PopulationDensitySource;
use turnout_etl::registry::wide::{diversity, education, income};
use turnout_etl::registry::{SourceLoader, load_election_table};

use crate::utils::{Fixture, age_csv, write_source};

#[test]
fn test_election_table_skips_national_row() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let table = load_election_table(&config).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.state_count(), 2);
    assert!(table.facts.iter().all(|f| f.state != "United States"));

    let ohio = &table.facts[0];
    assert_eq!(ohio.key(), StateYear::new("Ohio", 2016));
    assert_eq!(ohio.total_ballots, Some(1_000_000));
    assert_eq!(ohio.percent_voting_eligible, Some(0.5));
    assert!(table.parse_issues.is_empty());
}

#[test]
fn test_income_units_row_is_dropped() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let sources = income().load(&config).unwrap();
    assert_eq!(sources.len(), 1);
    let income = &sources[0];
    assert_eq!(income.metric_name(), "Income");
    assert_eq!(income.len(), 4);
    assert_eq!(income.get(&StateYear::new("Iowa", 2018)), Some(Some(59955.0)));
    assert!(income.parse_issues().is_empty());
}

#[test]
fn test_diversity_excludes_configured_locations() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let sources = diversity().load(&config).unwrap();
    let white = &sources[0];
    assert!(!white.contains_key(&StateYear::new("Puerto Rico", 2016)));
    assert!(!white.contains_key(&StateYear::new("United States", 2016)));
    assert_eq!(white.get(&StateYear::new("Ohio", 2018)), Some(Some(0.78)));
}

#[test]
fn test_education_blank_cell_is_null_not_issue() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let sources = education().load(&config).unwrap();
    let bachelors = &sources[0];
    assert_eq!(bachelors.get(&StateYear::new("Iowa", 2018)), Some(None));
    assert!(bachelors.parse_issues().is_empty());
}

#[test]
fn test_age_average_from_bands() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let sources = AgeSource.load(&config).unwrap();
    let age = &sources[0];
    assert_eq!(age.metric_name(), "AverageAge");
    assert_eq!(age.len(), 4);

    let expected = 241.0 / 6.0;
    let value = age.get(&StateYear::new("Ohio", 2016)).flatten().unwrap();
    assert!((value - expected).abs() < 1e-9);
}

#[test]
fn test_age_year_without_all_bands_is_absent() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    // 2018 loses its last band column
    let csv = age_csv(&[2016, 2018])
        .lines()
        .map(|line| {
            let mut cells: Vec<&str> = line.split(',').collect();
            if cells.len() > 1 {
                cells.remove(13);
            }
            cells.join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");
    write_source(fixture.path(), "age.csv", &csv);

    let sources = AgeSource.load(&config).unwrap();
    let age = &sources[0];
    assert!(age.contains_key(&StateYear::new("Ohio", 2016)));
    assert!(!age.contains_key(&StateYear::new("Ohio", 2018)));
}

#[test]
fn test_population_density_columns() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());

    let sources = PopulationDensitySource.load(&config).unwrap();
    let names: Vec<_> = sources.iter().map(|s| s.metric_name()).collect();
    assert_eq!(names, vec!["Population", "LandAreaSQM", "PopulationDensity"]);

    let key = StateYear::new("Ohio", 2016);
    assert_eq!(sources[1].get(&key), Some(Some(40_000.0)));
    // 1000 * 11,600,000 / 40,000
    assert_eq!(sources[2].get(&key), Some(Some(290_000.0)));
}
