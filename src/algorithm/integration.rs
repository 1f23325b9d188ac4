//! Cross-source integration logic
//!
//! Left-joins normalized sources onto the election anchor table. The
//! accumulated table is threaded through each join by value; every join adds
//! exactly one column and never changes the number or order of rows.

use std::fmt;

use crate::error::{EtlError, Result};
use crate::models::ElectionFact;
use crate::normalize::NormalizedSource;

/// One column added by a join, aligned with the anchor rows
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Match counts for one join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStats {
    pub column: String,
    pub source_name: String,
    /// Anchor rows with a key in the source
    pub matched: usize,
    /// Anchor rows without a key in the source (null in the new column)
    pub unmatched: usize,
}

impl fmt::Display for JoinStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (from {}): {} matched, {} unmatched",
            self.column, self.source_name, self.matched, self.unmatched
        )
    }
}

/// The anchor facts plus every column joined so far
#[derive(Debug, Clone, Default)]
pub struct IntegratedTable {
    facts: Vec<ElectionFact>,
    columns: Vec<JoinedColumn>,
}

impl IntegratedTable {
    /// Start from the anchor facts with no joined columns
    #[must_use]
    pub fn new(facts: Vec<ElectionFact>) -> Self {
        Self {
            facts,
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn facts(&self) -> &[ElectionFact] {
        &self.facts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Names of the joined columns, in join order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of a joined column, aligned with [`Self::facts`]
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Left-join a source on `(state, year)`, adding one column named after its metric
    pub fn left_join(mut self, source: &NormalizedSource) -> Result<(Self, JoinStats)> {
        let name = source.metric_name();
        if self.column(name).is_some() {
            return Err(EtlError::DuplicateColumn(name.to_string()));
        }

        let mut matched = 0usize;
        let values: Vec<Option<f64>> = self
            .facts
            .iter()
            .map(|fact| match source.get(&fact.key()) {
                Some(value) => {
                    matched += 1;
                    value
                }
                None => None,
            })
            .collect();

        let stats = JoinStats {
            column: name.to_string(),
            source_name: source.source_name().to_string(),
            matched,
            unmatched: self.facts.len() - matched,
        };
        log::info!("Joined {stats}");

        self.columns.push(JoinedColumn {
            name: name.to_string(),
            values,
        });
        Ok((self, stats))
    }
}

/// Join every source in order onto the anchor facts
pub fn join_sources<'a>(
    facts: Vec<ElectionFact>,
    sources: impl IntoIterator<Item = &'a NormalizedSource>,
) -> Result<(IntegratedTable, Vec<JoinStats>)> {
    let mut table = IntegratedTable::new(facts);
    let mut stats = Vec::new();
    for source in sources {
        let (joined, join_stats) = table.left_join(source)?;
        table = joined;
        stats.push(join_stats);
    }
    Ok((table, stats))
}
