//! Election fact model
//!
//! The anchor table of the pipeline: one row per (state, year) present in the
//! election results files. Every auxiliary source is left-joined onto it.

use crate::algorithm::derived::turnout_percentage;
use crate::models::types::StateYear;

/// Turnout figures for one state in one election year
#[derive(Debug, Clone, PartialEq)]
pub struct ElectionFact {
    pub state: String,
    pub year: i32,
    pub total_ballots: Option<i64>,
    pub voting_eligible_population: Option<i64>,
    pub voting_age_population: Option<i64>,
    /// Ballots over voting-eligible population, 0–1 scale
    pub percent_voting_eligible: Option<f64>,
    /// Ballots over voting-age population, 0–1 scale
    pub percent_voting_age: Option<f64>,
}

impl ElectionFact {
    /// Create a fact from raw counts, deriving both turnout percentages
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        year: i32,
        total_ballots: Option<i64>,
        voting_eligible_population: Option<i64>,
        voting_age_population: Option<i64>,
    ) -> Self {
        Self {
            state: state.into(),
            year,
            total_ballots,
            voting_eligible_population,
            voting_age_population,
            percent_voting_eligible: turnout_percentage(total_ballots, voting_eligible_population),
            percent_voting_age: turnout_percentage(total_ballots, voting_age_population),
        }
    }

    /// The join key of this fact
    #[must_use]
    pub fn key(&self) -> StateYear {
        StateYear::new(self.state.clone(), self.year)
    }
}
