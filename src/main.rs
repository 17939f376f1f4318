//! sobel-shard command-line interface.
//!
//! Detect edges in an image file:
//! ```sh
//! sobel-shard input.jpg edges.jpg --workers 8
//! sobel-shard input.png edges.png --config sobel.toml --scheduling sequential
//! sobel-shard input.jpg edges.jpg --serial
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use sobel_shard::codec;
use sobel_shard::config::{load_config, PipelineConfig};
use sobel_shard::filters::edge::filter_serial;
use sobel_shard::pipeline::{filter_with, Scheduling};

#[derive(Parser)]
#[command(name = "sobel-shard")]
#[command(about = "Row-partitioned Sobel edge detection")]
#[command(version)]
struct Cli {
    /// Image to read (any format supported by the `image` crate).
    input: PathBuf,
    /// Where to write the edge map; `.jpg`/`.jpeg` honour `--quality`.
    output: PathBuf,
    /// Number of row partitions.
    #[arg(short, long)]
    workers: Option<usize>,
    /// TOML configuration file; command-line flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// How partitions are executed.
    #[arg(long, value_enum)]
    scheduling: Option<SchedulingArg>,
    /// Filter the whole image in a single pass without partitioning.
    #[arg(long, conflicts_with_all = ["workers", "scheduling"])]
    serial: bool,
    /// JPEG output quality (1-100).
    #[arg(short, long)]
    quality: Option<u8>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchedulingArg {
    Parallel,
    Sequential,
}

impl From<SchedulingArg> for Scheduling {
    fn from(arg: SchedulingArg) -> Self {
        match arg {
            SchedulingArg::Parallel => Scheduling::Parallel,
            SchedulingArg::Sequential => Scheduling::Sequential,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(scheduling) = cli.scheduling {
        config.scheduling = scheduling.into();
    }
    if let Some(quality) = cli.quality {
        config.jpeg_quality = quality;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let image = codec::decode_grayscale(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let started = Instant::now();
    let filtered = if cli.serial {
        filter_serial(&image)
    } else {
        filter_with(&image, config.workers, config.scheduling)
    };
    let edges = filtered.with_context(|| format!("filtering {}", cli.input.display()))?;
    info!(
        "filtered {}x{} in {:.3}s",
        image.width(),
        image.height(),
        started.elapsed().as_secs_f64()
    );

    codec::encode(&cli.output, &edges, config.jpeg_quality)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("Sobel filter applied: {}", cli.output.display());
    Ok(())
}
