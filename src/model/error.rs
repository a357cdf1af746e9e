use std::io;

use thiserror::Error;

/// Invalid simulation parameters, detected before any timestep runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial faction fractions sum to {sum}, expected 1")]
    FractionSum { sum: f64 },

    #[error("parameter `{field}` = {value} lies outside {domain}")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        domain: &'static str,
    },

    #[error("parameter `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("population must be positive")]
    ZeroPopulation,
}

/// Failure while reading a parameter file from disk.
#[derive(Error, Debug)]
pub enum ParamsLoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed parameter file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
