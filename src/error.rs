//! Error types.
//!
//! The sort engine itself is total and never fails; errors only come from
//! user-supplied configuration and terminal I/O.

use thiserror::Error;

use crate::config::{MAX_SIZE, MIN_SIZE};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("array size {0} out of range ({min}..={max})", min = MIN_SIZE, max = MAX_SIZE)]
    SizeOutOfRange(usize),
    #[error("speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
    #[error("invalid array value {0:?}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = VisualizerError> = std::result::Result<T, E>;
