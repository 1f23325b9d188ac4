//! Utility functions for error handling
//!
//! File access helpers that attach the path and the reason a file was
//! needed to the error, so a missing source is reported by name.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{EtlError, Result};

/// Open a source file, mapping any failure to [`EtlError::SourceUnavailable`]
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn open_source(path: &Path, purpose: &str) -> Result<fs::File> {
    if path.is_dir() {
        return Err(EtlError::SourceUnavailable {
            path: path.to_path_buf(),
            purpose: purpose.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        });
    }

    fs::File::open(path).map_err(|source| EtlError::SourceUnavailable {
        path: path.to_path_buf(),
        purpose: purpose.to_string(),
        source,
    })
}

/// Create the output directory if needed
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(EtlError::Config(format!(
            "Output path is not a directory: {}",
            path.display()
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}
