//! Reading raw CSV sources into untyped wide tables.
//!
//! Sources are public downloads with ad-hoc layouts: title lines above the
//! header, a units row or a national aggregate row just below it. Those lines
//! are dropped by record index before the header is taken, so every source
//! can be described by a [`TableLayout`].

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use rustc_hash::FxHashSet;

use crate::error::util::open_source;
use crate::error::{EtlError, Result};
use crate::utils::logging::{log_empty_source, log_lossy_cells, log_source_read};

/// How a raw source file is laid out
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    /// Zero-based record indices to drop (blank lines are not counted);
    /// the first remaining record is the header
    pub skip_rows: Vec<usize>,
}

impl TableLayout {
    #[must_use]
    pub fn skipping(rows: &[usize]) -> Self {
        Self {
            skip_rows: rows.to_vec(),
        }
    }
}

/// A wide source table: a header row and string cells
#[derive(Debug, Clone)]
pub struct RawSourceTable {
    /// Name of the source, for diagnostics
    pub name: String,
    /// Header cells, trimmed
    pub headers: Vec<String>,
    /// Data rows; every row is padded or truncated to the header width
    pub rows: Vec<Vec<String>>,
}

impl RawSourceTable {
    /// Index of a column by exact (trimmed) header name
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| EtlError::missing_column(&self.name, column))
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a CSV file from disk
pub fn read_raw_table(path: &Path, name: &str, layout: &TableLayout) -> Result<RawSourceTable> {
    let start = Instant::now();
    log::debug!("Reading {name} source from {}", path.display());

    let file = open_source(path, name)?;
    let table = parse_raw_table(file, name, layout)?;
    if table.is_empty() {
        log_empty_source(name, path);
    }

    log_source_read(name, path, table.len(), start.elapsed());
    Ok(table)
}

/// Parse CSV content from any reader.
///
/// Cells that are not valid UTF-8 are decoded lossily, so a mis-encoded
/// numeric cell surfaces later as a parse issue instead of aborting the read.
pub fn parse_raw_table<R: Read>(reader: R, name: &str, layout: &TableLayout) -> Result<RawSourceTable> {
    let skip: FxHashSet<usize> = layout.skip_rows.iter().copied().collect();

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut lossy_cells = 0usize;

    for (line, record) in csv_reader.byte_records().enumerate() {
        let record = record?;
        if skip.contains(&line) {
            continue;
        }

        let cells: Vec<String> = record
            .iter()
            .map(|cell| {
                let text = String::from_utf8_lossy(cell);
                if matches!(text, Cow::Owned(_)) {
                    lossy_cells += 1;
                }
                text.trim().to_string()
            })
            .collect();
        match &headers {
            None => headers = Some(strip_bom(cells)),
            Some(header) => {
                if cells.iter().all(String::is_empty) {
                    continue;
                }
                let mut cells = cells;
                cells.resize(header.len(), String::new());
                rows.push(cells);
            }
        }
    }

    if lossy_cells > 0 {
        log_lossy_cells(name, lossy_cells);
    }

    let headers = headers.ok_or_else(|| EtlError::EmptySource {
        source_name: name.to_string(),
    })?;

    Ok(RawSourceTable {
        name: name.to_string(),
        headers,
        rows,
    })
}

fn strip_bom(mut headers: Vec<String>) -> Vec<String> {
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    headers
}
