use std::fs;

use turnout_etl::{DuplicateKeyPolicy, EtlError, OUTPUT_COLUMNS, run_pipeline};

use crate::utils::{EDUCATION, Fixture, read_output, write_source};

#[test]
fn test_writes_three_tables() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    let config = fixture.config(output.path());

    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.outputs.len(), 3);
    assert_eq!(report.anchor_rows, 4);
    assert_eq!(report.total_parse_issues(), 0);

    for name in [
        "election_demographics_final.csv",
        "election_demographics_presidential.csv",
        "election_demographics_midterm.csv",
    ] {
        assert!(output.path().join(name).exists(), "{name} missing");
    }

    let summary = report.to_string();
    assert!(summary.contains("full: 3 rows (1 dropped)"));
}

#[test]
fn test_final_table_columns_and_values() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    run_pipeline(&fixture.config(output.path())).unwrap();

    let (headers, rows) = read_output(&output.path().join("election_demographics_final.csv"));
    let expected: Vec<_> = OUTPUT_COLUMNS.iter().map(|c| c.header().to_string()).collect();
    assert_eq!(headers, expected);
    assert_eq!(rows.len(), 3);

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let ohio = &rows[0];
    assert_eq!(ohio[column("State")], "Ohio");
    assert_eq!(ohio[column("Year")], "2016");
    assert_eq!(ohio[column("YearsSince2000")], "16");
    assert_eq!(ohio[column("TotalBallots")], "1000000");
    assert_eq!(ohio[column("Presidential")], "1");
    let pve: f64 = ohio[column("PercentVotingEligibleVotes")].parse().unwrap();
    assert!((pve - 50.0).abs() < 1e-9);

    let years: Vec<_> = rows.iter().map(|r| r[column("Year")].as_str()).collect();
    assert_eq!(years, vec!["2016", "2016", "2018"]);
}

#[test]
fn test_midterm_table_is_integer_coded() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    run_pipeline(&fixture.config(output.path())).unwrap();

    let (headers, rows) = read_output(&output.path().join("election_demographics_midterm.csv"));
    let flag = headers.iter().position(|h| h == "Presidential").unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[flag] == "0"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let fixture = Fixture::new();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    run_pipeline(&fixture.config(first.path())).unwrap();
    run_pipeline(&fixture.config(second.path())).unwrap();

    for entry in fs::read_dir(first.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap();
        assert_eq!(
            fs::read(&path).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{} differs",
            path.display()
        );
    }
}

#[test]
fn test_parquet_written_on_request() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    let mut config = fixture.config(output.path());
    config.write_parquet = true;

    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.outputs.len(), 6);
    assert!(
        output
            .path()
            .join("election_demographics_final.parquet")
            .exists()
    );
}

#[test]
fn test_missing_source_fails_before_writing() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    fs::remove_file(fixture.path().join("education.csv")).unwrap();

    let err = run_pipeline(&fixture.config(output.path())).unwrap_err();
    assert!(err.is_source_unavailable(), "{err}");
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_election_year_file() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    let mut config = fixture.config(output.path());
    config.election_years.push(2020);

    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, EtlError::SourceUnavailable { .. }));
}

#[test]
fn test_duplicate_key_rejected_by_default() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    let duplicated = format!("{EDUCATION}Ohio,30.0,31.0\n");
    write_source(fixture.path(), "education.csv", &duplicated);

    let err = run_pipeline(&fixture.config(output.path())).unwrap_err();
    assert!(err.is_join_key_violation(), "{err}");
}

#[test]
fn test_duplicate_key_keep_first() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    let duplicated = format!("{EDUCATION}Ohio,30.0,31.0\n");
    write_source(fixture.path(), "education.csv", &duplicated);

    let mut config = fixture.config(output.path());
    config.duplicate_key_policy = DuplicateKeyPolicy::KeepFirst;
    run_pipeline(&config).unwrap();

    let (headers, rows) = read_output(&output.path().join("election_demographics_final.csv"));
    let bachelors = headers.iter().position(|h| h == "PercentBachelors").unwrap();
    let bachelors: f64 = rows[0][bachelors].parse().unwrap();
    assert!((bachelors - 28.0).abs() < 1e-9);
}

#[test]
fn test_unparseable_cell_is_counted() {
    let fixture = Fixture::new();
    let output = tempfile::tempdir().unwrap();
    write_source(
        fixture.path(),
        "education.csv",
        "Name,2016,2018\nOhio,28.0,29.0\nIowa,n/a%,30.0\n",
    );

    let report = run_pipeline(&fixture.config(output.path())).unwrap();
    assert_eq!(report.total_parse_issues(), 1);
    // Iowa 2016 now lacks education and leaves the full table
    assert_eq!(report.partitions[0].rows, 3);
}
