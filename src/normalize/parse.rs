//! Cell coercion for numeric text
//!
//! Source cells carry thousands separators, stray whitespace and a handful of
//! missing-value markers. A cell that is present but not numeric is a parse
//! issue: it is recorded and the value becomes null.

use std::fmt;

/// Markers treated as missing values rather than parse failures
const MISSING_MARKERS: [&str; 5] = ["NA", "N/A", "-", "\u{2013}", "NaN"];

/// A cell that could not be coerced to a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub source_name: String,
    pub location: String,
    pub column: String,
    pub raw: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: cannot parse '{}' in column '{}' for {}",
            self.source_name, self.raw, self.column, self.location
        )
    }
}

/// Outcome of coercing a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Number(f64),
    Missing,
    Invalid,
}

impl CellValue {
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Missing | Self::Invalid => None,
        }
    }
}

/// Parse a numeric cell, stripping thousands separators
#[must_use]
pub fn parse_number(cell: &str) -> CellValue {
    let trimmed = cell.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        return CellValue::Missing;
    }

    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Invalid,
    }
}

/// Parse a whole-number count; fractional values are invalid
#[must_use]
pub fn parse_count(cell: &str) -> CellValue {
    match parse_number(cell) {
        CellValue::Number(v) if v.fract() != 0.0 || v.abs() >= i64::MAX as f64 => CellValue::Invalid,
        other => other,
    }
}

/// Leading numeric year of a column header, e.g. `2016__White` gives 2016
#[must_use]
pub fn leading_year(header: &str) -> Option<i32> {
    let trimmed = header.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(trimmed.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Split a `YYYY__label` header into its year and label
#[must_use]
pub fn split_year_label(header: &str) -> Option<(i32, &str)> {
    let (year, label) = header.split_once("__")?;
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((year.parse().ok()?, label.trim()))
}
