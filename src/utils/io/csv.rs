//! CSV output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::logging::log_table_written;

/// Write a record batch as CSV with a header row; nulls are written as empty cells
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();

    let file = BufWriter::new(File::create(path)?);
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    writer.into_inner().flush()?;

    log_table_written("CSV", path, batch.num_rows(), start.elapsed());
    Ok(())
}
