//! Keyed long-format output of one source
//!
//! A [`NormalizedSource`] holds at most one value per `(location, year)`.
//! Uniqueness is enforced on insert according to the configured
//! [`DuplicateKeyPolicy`], so the joiner can rely on zero-or-one matches.

use rustc_hash::FxHashMap;

use crate::config::DuplicateKeyPolicy;
use crate::error::{EtlError, Result};
use crate::models::{NormalizedRecord, StateYear};
use crate::normalize::parse::{CellValue, ParseIssue, parse_count, parse_number};

/// One metric of one source, keyed by location and year
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    source_name: String,
    metric_name: String,
    policy: DuplicateKeyPolicy,
    /// Keys in insertion order
    keys: Vec<StateYear>,
    values: FxHashMap<StateYear, Option<f64>>,
    parse_issues: Vec<ParseIssue>,
    duplicates_ignored: usize,
}

impl NormalizedSource {
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        metric_name: impl Into<String>,
        policy: DuplicateKeyPolicy,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            metric_name: metric_name.into(),
            policy,
            keys: Vec::new(),
            values: FxHashMap::default(),
            parse_issues: Vec::new(),
            duplicates_ignored: 0,
        }
    }

    /// Insert a value, applying the duplicate-key policy
    pub fn insert(&mut self, key: StateYear, value: Option<f64>) -> Result<()> {
        if self.values.contains_key(&key) {
            return match self.policy {
                DuplicateKeyPolicy::Reject => Err(EtlError::JoinKeyViolation {
                    source_name: self.source_name.clone(),
                    location: key.location,
                    year: key.year,
                }),
                DuplicateKeyPolicy::KeepFirst => {
                    log::debug!(
                        "{}: ignoring duplicate {} for {key}",
                        self.source_name,
                        self.metric_name
                    );
                    self.duplicates_ignored += 1;
                    Ok(())
                }
            };
        }

        self.keys.push(key.clone());
        self.values.insert(key, value);
        Ok(())
    }

    /// Value for a key: `None` if the key is absent, `Some(None)` if present but null
    #[must_use]
    pub fn get(&self, key: &StateYear) -> Option<Option<f64>> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn contains_key(&self, key: &StateYear) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &StateYear> {
        self.keys.iter()
    }

    /// Long-format records in insertion order
    pub fn records(&self) -> impl Iterator<Item = NormalizedRecord> + '_ {
        self.keys.iter().map(|key| NormalizedRecord {
            location: key.location.clone(),
            year: key.year,
            metric_name: self.metric_name.clone(),
            value: self.values.get(key).copied().flatten(),
        })
    }

    #[must_use]
    pub fn parse_issues(&self) -> &[ParseIssue] {
        &self.parse_issues
    }

    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = ParseIssue>) {
        self.parse_issues.extend(issues);
    }

    /// Number of duplicate keys skipped under [`DuplicateKeyPolicy::KeepFirst`]
    #[must_use]
    pub const fn duplicates_ignored(&self) -> usize {
        self.duplicates_ignored
    }
}

/// Coerces cells of one source and records the ones that fail
#[derive(Debug)]
pub struct CellParser {
    source_name: String,
    issues: Vec<ParseIssue>,
}

impl CellParser {
    #[must_use]
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            issues: Vec::new(),
        }
    }

    /// Parse a numeric cell; invalid cells are recorded and become `None`
    pub fn number(&mut self, location: &str, column: &str, raw: &str) -> Option<f64> {
        let parsed = parse_number(raw);
        self.track(parsed, location, column, raw)
    }

    /// Parse a whole-number cell; invalid cells are recorded and become `None`
    pub fn count(&mut self, location: &str, column: &str, raw: &str) -> Option<i64> {
        let parsed = parse_count(raw);
        self.track(parsed, location, column, raw).map(|v| v as i64)
    }

    fn track(&mut self, parsed: CellValue, location: &str, column: &str, raw: &str) -> Option<f64> {
        if parsed == CellValue::Invalid {
            let issue = ParseIssue {
                source_name: self.source_name.clone(),
                location: location.to_string(),
                column: column.to_string(),
                raw: raw.to_string(),
            };
            log::debug!("{issue}");
            self.issues.push(issue);
        }
        parsed.value()
    }

    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<ParseIssue> {
        if !self.issues.is_empty() {
            log::warn!(
                "{}: {} cell(s) could not be parsed and were treated as missing",
                self.source_name,
                self.issues.len()
            );
        }
        self.issues
    }
}
