// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vi_raster::batch::process_batch;
use vi_raster::cli::{Cli, Commands};
use vi_raster::processing::{BatchReport, ImageType, IndexRegistry, Pipeline, VegetationRequest};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn finish(reports: &[BatchReport]) -> Result<()> {
    let written: usize = reports.iter().map(|r| r.written.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();

    info!("Processing complete: {} written, {} failed", written, failed);
    if failed > 0 {
        bail!("{} of {} index products failed", failed, written + failed);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            image_type,
            out,
            indices,
            format,
            images,
        } => {
            let request = VegetationRequest::new(image_type, images, out, &indices)
                .context("invalid request")?
                .with_format(format);
            let pipeline = Pipeline::new(cli.threads)?;
            let report = pipeline.run(request);
            finish(&[report])
        }
        Commands::Batch { config } => {
            let reports = process_batch(&config, cli.threads)
                .with_context(|| format!("batch {}", config.display()))?;
            finish(&reports)
        }
        Commands::List { image_type } => {
            let types = match image_type {
                Some(image_type) => vec![image_type],
                None => vec![ImageType::Rgb, ImageType::Multi],
            };
            for image_type in types {
                let registry = IndexRegistry::for_image_type(image_type);
                println!("{}: {}", image_type, registry.names().iter().join(" "));
            }
            Ok(())
        }
    }
}
