use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use turnout_etl::{PipelineConfig, run_pipeline};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Parser)]
#[command(name = "turnout-etl")]
#[command(about = "Build the election demographics tables from raw CSV sources")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the raw sources
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory the output tables are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write Parquet copies of the outputs
    #[arg(long)]
    parquet: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.parquet {
        config.write_parquet = true;
    }

    let report = run_pipeline(&config).context("turnout pipeline failed")?;
    info!("{report}");
    Ok(())
}
