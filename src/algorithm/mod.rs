//! Pipeline algorithms: derived metrics, joins, finalization and partitioning

pub mod derived;
pub mod finalize;
pub mod integration;
pub mod partition;

pub use finalize::{drop_incomplete, finalize};
pub use integration::{IntegratedTable, JoinStats, join_sources};
pub use partition::{DatasetPartition, DatasetPartitions, PartitionKind, partition};
