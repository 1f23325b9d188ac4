//! File-level log lines for the source reader and the output writers

use std::path::Path;
use std::time::Duration;

/// A source file was read into a raw table
pub fn log_source_read(source_name: &str, path: &Path, rows: usize, elapsed: Duration) {
    log::info!(
        "{source_name}: {rows} data row(s) from {} ({elapsed:?})",
        path.display()
    );
}

/// A source file holds a header and nothing below it
pub fn log_empty_source(source_name: &str, path: &Path) {
    log::warn!("{source_name}: no data rows under the header in {}", path.display());
}

/// Cells that were not valid UTF-8 and were decoded lossily
pub fn log_lossy_cells(source_name: &str, cells: usize) {
    log::warn!("{source_name}: {cells} cell(s) were not valid UTF-8 and were decoded lossily");
}

/// A finalized table was written in the given format
pub fn log_table_written(format: &str, path: &Path, rows: usize, elapsed: Duration) {
    log::info!("Wrote {rows} row(s) as {format} to {} ({elapsed:?})", path.display());
}
