//! Domain models for the turnout pipeline

pub mod demographics;
pub mod election;
pub mod features;
pub mod types;

pub use demographics::{DemographicsRecord, OUTPUT_COLUMNS, OutputColumn, is_presidential_year};
pub use election::ElectionFact;
pub use features::{
    FeatureRequest, FeatureVector, INCOME_SCALE, MODEL_INPUT_COLUMNS, MODEL_TARGET_COLUMN,
};
pub use types::{NormalizedRecord, StateYear};
