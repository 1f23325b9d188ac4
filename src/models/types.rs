//! Key and record types shared across the pipeline stages

use std::fmt;

/// Join key: a location label and a calendar year
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateYear {
    pub location: String,
    pub year: i32,
}

impl StateYear {
    #[must_use]
    pub fn new(location: impl Into<String>, year: i32) -> Self {
        Self {
            location: location.into(),
            year,
        }
    }
}

impl fmt::Display for StateYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.location, self.year)
    }
}

/// One long-format value produced by a source normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub location: String,
    pub year: i32,
    pub metric_name: String,
    /// `None` when the cell was missing or could not be parsed
    pub value: Option<f64>,
}

impl NormalizedRecord {
    /// The join key of this record
    #[must_use]
    pub fn key(&self) -> StateYear {
        StateYear::new(self.location.clone(), self.year)
    }
}
