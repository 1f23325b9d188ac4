//! Wide-to-long reshaping

use crate::error::Result;
use crate::models::StateYear;
use crate::normalize::NormalizeOptions;
use crate::normalize::parse::leading_year;
use crate::normalize::source::{CellParser, NormalizedSource};
use crate::reader::RawSourceTable;

/// Melt a wide-by-year table into one metric keyed by `(location, year)`.
///
/// Every column other than `id_column` whose header starts with a numeric
/// year becomes one record per row; the year is the leading numeric token of
/// the header, so `2016__White` and `2016` both map to 2016. Columns without a
/// leading year are ignored. Missing and unparseable cells become nulls.
pub fn melt_by_year(
    table: &RawSourceTable,
    id_column: &str,
    metric_name: &str,
    options: &NormalizeOptions,
) -> Result<NormalizedSource> {
    let id_idx = table.column_index(id_column)?;

    let year_columns: Vec<(usize, i32)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != id_idx)
        .filter_map(|(idx, header)| match leading_year(header) {
            Some(year) => Some((idx, year)),
            None => {
                log::debug!("{}: ignoring non-year column '{header}'", table.name);
                None
            }
        })
        .collect();

    let mut source = NormalizedSource::new(&table.name, metric_name, options.duplicate_key_policy);
    let mut parser = CellParser::new(&table.name);

    for row in &table.rows {
        let location = row[id_idx].as_str();
        if location.is_empty() || options.is_excluded(location) {
            continue;
        }

        for &(idx, year) in &year_columns {
            let value = parser.number(location, &table.headers[idx], &row[idx]);
            source.insert(StateYear::new(location, year), value)?;
        }
    }

    source.extend_issues(parser.into_issues());
    log::info!(
        "Normalized {} into {} {} records",
        table.name,
        source.len(),
        metric_name
    );
    Ok(source)
}
