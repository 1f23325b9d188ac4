//! Model-input contract
//!
//! The training step reads [`MODEL_INPUT_COLUMNS`] as inputs and
//! [`MODEL_TARGET_COLUMN`] as the target from the full table. Inference
//! requests must be assembled into the same order by field name.

use serde::Deserialize;

use crate::models::demographics::{DemographicsRecord, OutputColumn};

/// Model inputs, in training order
pub const MODEL_INPUT_COLUMNS: [OutputColumn; 5] = [
    OutputColumn::Presidential,
    OutputColumn::PercentBachelors,
    OutputColumn::Income,
    OutputColumn::PercentWhite,
    OutputColumn::AverageAge,
];

/// Regression target
pub const MODEL_TARGET_COLUMN: OutputColumn = OutputColumn::PercentVotingEligibleVotes;

/// Divisor turning raw currency units into thousands
pub const INCOME_SCALE: f64 = 1000.0;

/// Feature values in [`MODEL_INPUT_COLUMNS`] order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; 5]);

impl FeatureVector {
    /// Extract the inputs from a finalized row, `None` if any input is missing
    #[must_use]
    pub fn from_record(record: &DemographicsRecord) -> Option<Self> {
        Some(Self([
            record.presidential_code() as f64,
            record.percent_bachelors?,
            record.income?,
            record.percent_white?,
            record.average_age?,
        ]))
    }

    #[must_use]
    pub const fn values(&self) -> &[f64; 5] {
        &self.0
    }
}

/// A prediction request with named fields
///
/// Income arrives in raw currency units; the other fields are already on the
/// output scales (0/1 flag, 0–100 percentages, years). The web form posts
/// `bachelorsPercent`, `averageIncome` and `whitePercent`, accepted as aliases;
/// extra keys such as `year` are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    pub presidential: f64,
    #[serde(alias = "bachelorsPercent")]
    pub percent_bachelors: f64,
    #[serde(alias = "averageIncome")]
    pub income: f64,
    #[serde(alias = "whitePercent")]
    pub percent_white: f64,
    pub average_age: f64,
}

impl FeatureRequest {
    /// Assemble the feature vector in [`MODEL_INPUT_COLUMNS`] order, rescaling income to thousands
    #[must_use]
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector([
            self.presidential,
            self.percent_bachelors,
            self.income / INCOME_SCALE,
            self.percent_white,
            self.average_age,
        ])
    }
}
