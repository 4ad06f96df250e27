//! CIS gadget search CLI
//!
//! Sweeps a grid of gadget parameters, prints the best growth estimate per
//! cell and writes `<tag>_values.csv` and `<tag>_graphs.csv`. With
//! `--mode cycles` it samples random linked cycles instead and writes the
//! extremes to `<tag>_cycles.csv`.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::path::Path;

use clap::Parser;
use cis_common::SearchConfig;
use cis_driver::{CycleExtremes, DriverError, GadgetSearch};
use tracing::info;

use args::{Args, ModeArg};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();
    match args.mode {
        ModeArg::Gadgets => search_gadgets(config, &args.output_dir)?,
        ModeArg::Cycles => sample_cycles(config, &args.output_dir)?,
    }

    Ok(())
}

fn search_gadgets(config: SearchConfig, output_dir: &Path) -> Result<(), DriverError> {
    info!("Searching {}", config.tag());
    let report = GadgetSearch::new(config).run()?;

    for cell in &report.cells {
        println!("{cell}\n");
    }

    let (values, graphs) = report.write_files(output_dir)?;
    info!("Wrote {} and {}", values.display(), graphs.display());
    Ok(())
}

fn sample_cycles(config: SearchConfig, output_dir: &Path) -> Result<(), DriverError> {
    info!("Sampling linked cycles {}", config.cycle_tag());
    let report = CycleExtremes::new(config).run()?;

    for cell in &report.cells {
        println!("{cell}\n");
    }

    let path = report.write_file(output_dir)?;
    info!("Wrote {}", path.display());
    Ok(())
}
