//! Election results: the anchor table
//!
//! One file per election year. The first line is a group header above the
//! real header and the line after the header is the national total; the state
//! name sits in the first, unlabelled column.

use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::config::{DuplicateKeyPolicy, PipelineConfig};
use crate::error::{EtlError, Result};
use crate::models::ElectionFact;
use crate::normalize::{CellParser, ParseIssue};
use crate::reader::{RawSourceTable, TableLayout, read_raw_table};

pub const TOTAL_BALLOTS_COLUMN: &str = "Total Ballots Counted";
pub const VEP_COLUMN: &str = "Voting-Eligible Population (VEP)";
pub const VAP_COLUMN: &str = "Voting-Age Population (VAP)";

/// Layout of a yearly election results file
#[must_use]
pub fn election_layout() -> TableLayout {
    TableLayout::skipping(&[0, 2])
}

/// The anchor fact table with the parse issues met while building it
#[derive(Debug, Clone, Default)]
pub struct ElectionTable {
    pub facts: Vec<ElectionFact>,
    pub parse_issues: Vec<ParseIssue>,
}

impl ElectionTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Number of distinct states in the table
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.facts
            .iter()
            .map(|f| f.state.as_str())
            .collect::<FxHashSet<_>>()
            .len()
    }
}

/// Normalize one year's results into election facts
pub fn normalize_election_year(
    table: &RawSourceTable,
    year: i32,
) -> Result<(Vec<ElectionFact>, Vec<ParseIssue>)> {
    if table.headers.is_empty() {
        return Err(EtlError::missing_column(&table.name, "state"));
    }
    let ballots_idx = table.column_index(TOTAL_BALLOTS_COLUMN)?;
    let vep_idx = table.column_index(VEP_COLUMN)?;
    let vap_idx = table.column_index(VAP_COLUMN)?;

    let mut parser = CellParser::new(&table.name);
    let mut facts = Vec::with_capacity(table.len());

    for row in &table.rows {
        let state = row[0].as_str();
        if state.is_empty() {
            continue;
        }
        let ballots = parser.count(state, TOTAL_BALLOTS_COLUMN, &row[ballots_idx]);
        let vep = parser.count(state, VEP_COLUMN, &row[vep_idx]);
        let vap = parser.count(state, VAP_COLUMN, &row[vap_idx]);
        facts.push(ElectionFact::new(state, year, ballots, vep, vap));
    }

    Ok((facts, parser.into_issues()))
}

/// Load every configured election year into the anchor table.
///
/// Rows keep file order, years follow the configured order. A repeated
/// `(state, year)` is handled by the duplicate-key policy.
pub fn load_election_table(config: &PipelineConfig) -> Result<ElectionTable> {
    let start = Instant::now();
    let mut table = ElectionTable::default();
    let mut seen = FxHashSet::default();

    for &year in &config.election_years {
        let path = config.data_path(&config.files.election_file(year));
        let raw = read_raw_table(&path, &format!("election {year}"), &election_layout())?;
        let (facts, issues) = normalize_election_year(&raw, year)?;

        for fact in facts {
            if !seen.insert(fact.key()) {
                match config.duplicate_key_policy {
                    DuplicateKeyPolicy::Reject => {
                        return Err(EtlError::JoinKeyViolation {
                            source_name: raw.name.clone(),
                            location: fact.state,
                            year,
                        });
                    }
                    DuplicateKeyPolicy::KeepFirst => {
                        log::debug!("{}: ignoring duplicate row for {}", raw.name, fact.state);
                        continue;
                    }
                }
            }
            table.facts.push(fact);
        }
        table.parse_issues.extend(issues);
    }

    let expected = config.expected_states * config.election_years.len();
    if table.len() == expected {
        log::info!(
            "Loaded {} election rows ({} states x {} years) in {:?}",
            table.len(),
            config.expected_states,
            config.election_years.len(),
            start.elapsed()
        );
    } else {
        log::warn!(
            "Loaded {} election rows, expected {} ({} states x {} years)",
            table.len(),
            expected,
            config.expected_states,
            config.election_years.len()
        );
    }

    Ok(table)
}
