// Copyright (c) 2026 rezky_nightky

use std::io;

use thiserror::Error;

/// Rejected settings. Raised before the render loop starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to apply --ratio {0} (min 0 max 100)")]
    RatioOutOfRange(i64),
    #[error("the flake character is missing")]
    EmptyFlake,
    #[error("the flake {0:?} contains control characters")]
    UnprintableFlake(String),
    #[error("failed to apply --duration {0} (must be a finite number)")]
    NonFiniteDuration(f64),
    #[error("failed to apply --duration {0} (min 0.1 max 86400)")]
    DurationOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum DimensionError {
    #[error("terminal size is not supported on {0}")]
    Unsupported(&'static str),
    #[error("failed to query terminal size: {0}")]
    Query(#[source] io::Error),
    #[error("terminal reported an empty size ({rows} rows, {columns} columns)")]
    Empty { rows: u16, columns: u16 },
}

#[derive(Error, Debug)]
pub enum SnowError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Environment(#[from] DimensionError),
    #[error("failed to write frame: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T, E = SnowError> = std::result::Result<T, E>;
