use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("arrival rate must be > 0 (got {0})")]
    InvalidArrivalRate(f64),
    #[error("service rate must be > 0 (got {0})")]
    InvalidServiceRate(f64),
    #[error("channel count must be >= 1")]
    NoChannels,
    #[error("time horizon must be > 0 (got {0} hours)")]
    InvalidHorizon(f64),
    #[error("run count must be >= 1")]
    NoRuns,
    #[error("patience must be >= 0 (got {0} hours)")]
    InvalidPatience(f64),
    #[error("exponential rate must be finite and > 0 (got {0})")]
    InvalidRate(f64),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
