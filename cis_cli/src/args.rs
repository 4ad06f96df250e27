use std::path::PathBuf;

use clap::Parser;
use cis_common::SearchConfig;

/// CIS gadget search - estimate how fast #CIS can grow along gadget chains
#[derive(Parser, Debug)]
#[command(name = "cis")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Smallest gadget size (vertices)
    #[arg(long, default_value_t = 10)]
    pub min_size: usize,
    /// Largest gadget size (vertices); sizes step by two
    #[arg(long, default_value_t = 10)]
    pub max_size: usize,

    /// Smallest maximum degree
    #[arg(long, default_value_t = 3)]
    pub min_degree: usize,
    /// Largest maximum degree
    #[arg(long, default_value_t = 3)]
    pub max_degree: usize,

    /// Smallest number of link pairs
    #[arg(long, default_value_t = 3)]
    pub min_links: usize,
    /// Largest number of link pairs
    #[arg(long, default_value_t = 3)]
    pub max_links: usize,

    /// Random candidates per grid cell
    #[arg(short = 'i', long, default_value_t = 100)]
    pub iterations: usize,
    /// Log progress every this many candidates
    #[arg(long, default_value_t = 50)]
    pub notify_interval: usize,

    /// Root RNG seed
    #[arg(short = 's', long, default_value_t = 0)]
    pub seed: u64,

    /// Enable parallel execution
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,

    /// Chain the best gadget this many times and report its #CIS
    #[arg(long, default_value_t = 0)]
    pub chain_check: usize,

    /// Directory for the CSV reports
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// What to search for
    #[arg(long, value_enum, default_value = "gadgets")]
    pub mode: ModeArg,
}

/// Search performed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Best chained gadget per (degree, size, link pairs)
    #[value(name = "gadgets")]
    Gadgets,
    /// Random linked cycles with the largest and smallest #CIS per (degree, size)
    #[value(name = "cycles")]
    Cycles,
}

impl Args {
    /// Convert command-line arguments into the search configuration
    pub fn to_config(&self) -> SearchConfig {
        SearchConfig::builder()
            .sizes(self.min_size, self.max_size)
            .degrees(self.min_degree, self.max_degree)
            .link_pairs(self.min_links, self.max_links)
            .iterations(self.iterations)
            .notify_interval(self.notify_interval)
            .seed(self.seed)
            .parallel(self.parallel)
            .chain_check(self.chain_check)
            .build()
    }
}
