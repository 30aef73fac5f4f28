use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "mmck-sim",
    about = "Monte Carlo simulation of an M/M/c/K service facility with impatient customers"
)]
pub struct Args {
    #[arg(long, help = "TOML or JSON config file; flags override file values")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Arrival rate in requests per hour")]
    pub arrival_rate: Option<f64>,
    #[arg(long, help = "Service rate in requests per hour per channel")]
    pub service_rate: Option<f64>,
    #[arg(long, help = "Number of service channels")]
    pub channels: Option<usize>,
    #[arg(long, help = "Maximum queue length; 0 refuses every blocked arrival")]
    pub queue_capacity: Option<usize>,
    #[arg(long, help = "Simulated time horizon in hours")]
    pub horizon: Option<f64>,
    #[arg(long, help = "Number of independent runs to average over")]
    pub runs: Option<usize>,
    #[arg(long, help = "Maximum tolerated wait in queue before reneging, in hours")]
    pub patience: Option<f64>,
    #[arg(long, help = "Seed for the variate stream; omit for seed 0")]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|e| Error::Cli(e.to_string()))
}
