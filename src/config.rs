use std::fs;
use std::path::Path;

use crate::cli::{Args, FormatArg};
use crate::error::{Error, Result};
use crate::models::SimConfig;

// Defaults: a two-lane inspection point seeing 36 vehicles a day, half an
// hour of service each, two hours of driver patience.
const DEFAULT_ARRIVAL_RATE: f64 = 1.5;
const DEFAULT_SERVICE_RATE: f64 = 2.0;
const DEFAULT_CHANNELS: usize = 2;
const DEFAULT_QUEUE_CAPACITY: usize = 3;
const DEFAULT_HORIZON_HOURS: f64 = 24.0;
const DEFAULT_RUNS: usize = 1000;
const DEFAULT_PATIENCE_HOURS: f64 = 2.0;

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Merges CLI flags over an optional config file over built-in defaults.
pub fn build_config(args: Args) -> Result<(SimConfig, FormatArg)> {
    let format = args.format.clone();
    let file = match &args.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    let config = match file {
        Some(file) => SimConfig {
            arrival_rate: args.arrival_rate.unwrap_or(file.arrival_rate),
            service_rate: args.service_rate.unwrap_or(file.service_rate),
            channels: args.channels.unwrap_or(file.channels),
            queue_capacity: args.queue_capacity.unwrap_or(file.queue_capacity),
            horizon_hours: args.horizon.unwrap_or(file.horizon_hours),
            runs: args.runs.unwrap_or(file.runs),
            patience_hours: args.patience.unwrap_or(file.patience_hours),
            seed: args.seed.or(file.seed),
        },
        None => SimConfig {
            arrival_rate: args.arrival_rate.unwrap_or(DEFAULT_ARRIVAL_RATE),
            service_rate: args.service_rate.unwrap_or(DEFAULT_SERVICE_RATE),
            channels: args.channels.unwrap_or(DEFAULT_CHANNELS),
            queue_capacity: args.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY),
            horizon_hours: args.horizon.unwrap_or(DEFAULT_HORIZON_HOURS),
            runs: args.runs.unwrap_or(DEFAULT_RUNS),
            patience_hours: args.patience.unwrap_or(DEFAULT_PATIENCE_HOURS),
            seed: args.seed,
        },
    };

    Ok((config, format))
}
