use turnout_etl::algorithm::PartitionKind;
use turnout_etl::{DemographicsRecord, FeatureVector, build_partitions};

use crate::utils::Fixture;

fn finalized_rows() -> (Vec<DemographicsRecord>, usize) {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (partitions, report) = build_partitions(&config).unwrap();
    (partitions.full.rows, report.anchor_rows)
}

#[test]
fn test_partition_rows_never_exceed_anchor() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (partitions, report) = build_partitions(&config).unwrap();

    assert_eq!(report.anchor_rows, 4);
    for part in partitions.iter() {
        assert!(part.len() + part.dropped <= report.anchor_rows);
    }
    assert!(
        partitions.presidential.len() + partitions.midterm.len()
            <= report.anchor_rows
    );
}

#[test]
fn test_every_join_preserves_anchor_rows() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (_, report) = build_partitions(&config).unwrap();

    assert_eq!(report.joins.len(), 7);
    for join in &report.joins {
        assert_eq!(join.matched + join.unmatched, report.anchor_rows, "{join}");
    }
}

#[test]
fn test_year_offset_and_presidential_flag() {
    let (rows, _) = finalized_rows();
    for row in &rows {
        assert_eq!(row.years_since_2000, row.year - 2000);
        assert_eq!(row.presidential, row.year % 4 == 0);
        assert_eq!(row.presidential_code(), i64::from(row.year % 4 == 0));
    }
}

#[test]
fn test_percentages_are_rescaled() {
    let (rows, _) = finalized_rows();
    for row in &rows {
        for value in [row.percent_voting_eligible, row.percent_white]
            .into_iter()
            .flatten()
        {
            assert!((0.0..=100.0).contains(&value), "{value} out of range");
        }
    }

    let ohio_2016 = &rows[0];
    assert_eq!(ohio_2016.state, "Ohio");
    assert_eq!(ohio_2016.year, 2016);
    assert_eq!(ohio_2016.percent_voting_eligible, Some(50.0));
    assert!((ohio_2016.percent_white.unwrap() - 79.0).abs() < 1e-9);
    assert!((ohio_2016.income.unwrap() - 53.301).abs() < 1e-9);
    assert_eq!(ohio_2016.percent_bachelors, Some(28.0));
}

#[test]
fn test_partition_membership() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (partitions, _) = build_partitions(&config).unwrap();

    assert!(partitions.presidential.rows.iter().all(|r| r.presidential));
    assert!(partitions.midterm.rows.iter().all(|r| !r.presidential));

    for part in partitions.iter() {
        let required = part.kind.required_columns();
        assert!(part.rows.iter().all(|r| r.is_complete(required)));
    }
    assert_eq!(partitions.full.kind, PartitionKind::Full);
}

#[test]
fn test_full_rows_land_in_exactly_one_subset() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (partitions, _) = build_partitions(&config).unwrap();

    for row in &partitions.full.rows {
        let in_presidential = partitions.presidential.rows.contains(row);
        let in_midterm = partitions.midterm.rows.contains(row);
        assert!(in_presidential ^ in_midterm, "{} {}", row.state, row.year);
    }
}

#[test]
fn test_missing_education_drops_row_from_full_only() {
    let fixture = Fixture::new();
    let config = fixture.config(fixture.path());
    let (partitions, _) = build_partitions(&config).unwrap();

    assert_eq!(partitions.full.len(), 3);
    assert_eq!(partitions.full.dropped, 1);
    assert!(
        !partitions
            .full
            .rows
            .iter()
            .any(|r| r.state == "Iowa" && r.year == 2018)
    );

    // the subsets only require turnout
    assert_eq!(partitions.presidential.len(), 2);
    assert_eq!(partitions.midterm.len(), 2);
}

#[test]
fn test_feature_vector_from_complete_row() {
    let (rows, _) = finalized_rows();
    let features = FeatureVector::from_record(&rows[0]).unwrap();
    let [presidential, bachelors, income, white, age] = *features.values();
    assert_eq!(presidential, 1.0);
    assert_eq!(bachelors, 28.0);
    assert!((income - 53.301).abs() < 1e-9);
    assert!((white - 79.0).abs() < 1e-9);
    assert!((age - 241.0 / 6.0).abs() < 1e-9);
}
