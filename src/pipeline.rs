//! End-to-end pipeline run
//!
//! Raw sources are normalized, joined onto the election anchor table,
//! finalized, partitioned and written. Every stage takes the previous
//! stage's output by value or reference and returns a new value; nothing is
//! shared or mutated across stages.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use crate::algorithm::{DatasetPartitions, JoinStats, finalize, join_sources, partition};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::error::util::ensure_output_dir;
use crate::normalize::NormalizedSource;
use crate::registry::{SourceLoader, auxiliary_sources, load_election_table};
use crate::utils::{records_to_batch, write_csv, write_parquet};

/// Parse-issue count of one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssues {
    pub source_name: String,
    pub parse_issues: usize,
}

/// Kept and dropped row counts of one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub name: &'static str,
    pub rows: usize,
    pub dropped: usize,
}

/// Diagnostics of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub anchor_rows: usize,
    pub source_issues: Vec<SourceIssues>,
    pub joins: Vec<JoinStats>,
    pub partitions: Vec<PartitionSummary>,
    pub outputs: Vec<PathBuf>,
}

impl PipelineReport {
    /// Total parse issues across all sources
    #[must_use]
    pub fn total_parse_issues(&self) -> usize {
        self.source_issues.iter().map(|s| s.parse_issues).sum()
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Summary:")?;
        writeln!(f, "  Election Rows: {}", self.anchor_rows)?;
        writeln!(f, "  Parse Issues: {}", self.total_parse_issues())?;
        for source in self.source_issues.iter().filter(|s| s.parse_issues > 0) {
            writeln!(f, "    {}: {}", source.source_name, source.parse_issues)?;
        }
        writeln!(f, "  Joins:")?;
        for join in &self.joins {
            writeln!(f, "    {join}")?;
        }
        writeln!(f, "  Partitions:")?;
        for part in &self.partitions {
            writeln!(
                f,
                "    {}: {} rows ({} dropped)",
                part.name, part.rows, part.dropped
            )?;
        }
        for output in &self.outputs {
            writeln!(f, "  Wrote {}", output.display())?;
        }
        Ok(())
    }
}

/// Load and normalize every auxiliary source, in join order
pub fn load_sources(
    config: &PipelineConfig,
    loaders: &[Box<dyn SourceLoader>],
) -> Result<Vec<NormalizedSource>> {
    let mut sources = Vec::new();
    for loader in loaders {
        sources.extend(loader.load(config)?);
    }
    Ok(sources)
}

/// Run every stage up to partitioning without writing anything
pub fn build_partitions(config: &PipelineConfig) -> Result<(DatasetPartitions, PipelineReport)> {
    config.validate()?;

    let election = load_election_table(config)?;
    let sources = load_sources(config, &auxiliary_sources())?;

    let mut report = PipelineReport {
        anchor_rows: election.len(),
        ..Default::default()
    };
    report.source_issues.push(SourceIssues {
        source_name: "election".to_string(),
        parse_issues: election.parse_issues.len(),
    });
    report
        .source_issues
        .extend(sources.iter().map(|s| SourceIssues {
            source_name: format!("{}/{}", s.source_name(), s.metric_name()),
            parse_issues: s.parse_issues().len(),
        }));

    let (joined, joins) = join_sources(election.facts, &sources)?;
    report.joins = joins;

    let records = finalize(&joined)?;
    let partitions = partition(&records);
    report.partitions = partitions
        .iter()
        .map(|p| PartitionSummary {
            name: p.kind.name(),
            rows: p.len(),
            dropped: p.dropped,
        })
        .collect();

    Ok((partitions, report))
}

/// Write each partition to the output directory; returns the written paths
pub fn write_partitions(
    partitions: &DatasetPartitions,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>> {
    ensure_output_dir(&config.output_dir)?;

    let mut written = Vec::new();
    for part in partitions.iter() {
        let batch = records_to_batch(&part.rows)?;

        let csv_path = config
            .output_dir
            .join(format!("{}.csv", part.kind.file_stem()));
        write_csv(&batch, &csv_path)?;
        written.push(csv_path);

        if config.write_parquet {
            let parquet_path = config
                .output_dir
                .join(format!("{}.parquet", part.kind.file_stem()));
            write_parquet(&batch, &parquet_path)?;
            written.push(parquet_path);
        }
    }
    Ok(written)
}

/// Run the full pipeline and persist the outputs
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    let start = Instant::now();
    log::info!("Starting turnout pipeline\n{config}");

    let (partitions, mut report) = build_partitions(config)?;
    report.outputs = write_partitions(&partitions, config)?;

    log::info!("Pipeline finished in {:?}", start.elapsed());
    Ok(report)
}
