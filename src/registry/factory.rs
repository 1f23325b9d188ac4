//! Factory functions for the auxiliary source loaders

use super::SourceLoader;
use super::age::AgeSource;
use super::population::PopulationDensitySource;
use super::wide::{diversity, education, income};
use crate::error::{EtlError, Result};

/// Every auxiliary source, in the order they are joined onto the anchor table
#[must_use]
pub fn auxiliary_sources() -> Vec<Box<dyn SourceLoader>> {
    vec![
        Box::new(education()),
        Box::new(income()),
        Box::new(diversity()),
        Box::new(AgeSource),
        Box::new(PopulationDensitySource),
    ]
}

/// Create a source loader from its name
pub fn source_from_name(name: &str) -> Result<Box<dyn SourceLoader>> {
    match name.to_lowercase().as_str() {
        "education" => Ok(Box::new(education())),
        "income" => Ok(Box::new(income())),
        "diversity" => Ok(Box::new(diversity())),
        "age" => Ok(Box::new(AgeSource)),
        "population" | "density" => Ok(Box::new(PopulationDensitySource)),
        _ => Err(EtlError::Config(format!("Unknown source: {name}"))),
    }
}
