//! Dataset partitioning
//!
//! Splits the finalized rows into the full table and the presidential and
//! midterm subsets. Membership is decided on the integer-coded presidential
//! flag. Each partition owns its rows and drops incomplete ones against its
//! own required columns.

use std::fmt;

use crate::algorithm::finalize::drop_incomplete;
use crate::models::{DemographicsRecord, OutputColumn};

/// The three persisted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Full,
    Presidential,
    Midterm,
}

impl PartitionKind {
    pub const ALL: [Self; 3] = [Self::Full, Self::Presidential, Self::Midterm];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Presidential => "presidential",
            Self::Midterm => "midterm",
        }
    }

    /// File stem of the persisted table
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Full => "election_demographics_final",
            Self::Presidential => "election_demographics_presidential",
            Self::Midterm => "election_demographics_midterm",
        }
    }

    /// Presidential flag code selected by this partition, `None` for all rows
    #[must_use]
    pub const fn presidential_code(self) -> Option<i64> {
        match self {
            Self::Full => None,
            Self::Presidential => Some(1),
            Self::Midterm => Some(0),
        }
    }

    /// Columns a row must have to be kept in this partition
    #[must_use]
    pub const fn required_columns(self) -> &'static [OutputColumn] {
        match self {
            Self::Full => &[
                OutputColumn::State,
                OutputColumn::Year,
                OutputColumn::TotalBallots,
                OutputColumn::PercentVotingEligibleVotes,
                OutputColumn::PercentBachelors,
                OutputColumn::Income,
                OutputColumn::PercentWhite,
                OutputColumn::AverageAge,
                OutputColumn::Presidential,
            ],
            Self::Presidential | Self::Midterm => &[
                OutputColumn::State,
                OutputColumn::Year,
                OutputColumn::YearsSince2000,
                OutputColumn::PercentVotingEligibleVotes,
            ],
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully materialized subset of the finalized rows
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPartition {
    pub kind: PartitionKind,
    pub rows: Vec<DemographicsRecord>,
    /// Rows dropped for missing a required column
    pub dropped: usize,
}

impl DatasetPartition {
    /// Select this partition's rows and drop the incomplete ones
    #[must_use]
    pub fn build(kind: PartitionKind, records: &[DemographicsRecord]) -> Self {
        let selected: Vec<DemographicsRecord> = records
            .iter()
            .filter(|r| kind.presidential_code().is_none_or(|code| r.presidential_code() == code))
            .cloned()
            .collect();
        let (rows, dropped) = drop_incomplete(selected, kind.required_columns());

        if dropped > 0 {
            log::info!(
                "Partition {kind}: kept {} row(s), dropped {dropped} with missing required fields",
                rows.len()
            );
        } else {
            log::info!("Partition {kind}: kept {} row(s)", rows.len());
        }

        Self { kind, rows, dropped }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three partitions of one run
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPartitions {
    pub full: DatasetPartition,
    pub presidential: DatasetPartition,
    pub midterm: DatasetPartition,
}

impl DatasetPartitions {
    /// Iterate over the partitions in output order
    pub fn iter(&self) -> impl Iterator<Item = &DatasetPartition> {
        [&self.full, &self.presidential, &self.midterm].into_iter()
    }
}

/// Split finalized rows into the full, presidential and midterm partitions
#[must_use]
pub fn partition(records: &[DemographicsRecord]) -> DatasetPartitions {
    DatasetPartitions {
        full: DatasetPartition::build(PartitionKind::Full, records),
        presidential: DatasetPartition::build(PartitionKind::Presidential, records),
        midterm: DatasetPartition::build(PartitionKind::Midterm, records),
    }
}
