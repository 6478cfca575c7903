//! Configuration - command line surface and array generation.
//!
//! `Cli` is the raw clap parser; `Config` is the validated form the app runs
//! with. Size bounds only apply to generated arrays. Explicit `--values`
//! are passed to the engine as given.

use clap::{Parser, ValueEnum};
use rand::Rng;

use crate::engine::{Algorithm, Pacing};
use crate::error::ConfigError;
use crate::view::ViewMode;

pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 30;
pub const DEFAULT_SIZE: usize = 10;

/// Generated values are drawn from `1..=MAX_VALUE`.
pub const MAX_VALUE: i32 = 100;

// =============================================================================
// CLI
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Bar,
    Circle,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Bar => ViewMode::Bar,
            ViewArg::Circle => ViewMode::Circle,
        }
    }
}

/// Animated sorting algorithm visualizer.
#[derive(Debug, Parser)]
#[command(name = "sortscope", version, about, long_about = None)]
pub struct Cli {
    /// Number of generated elements (5..=30)
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// bubble, selection, insertion or merge (unknown names fall back to bubble)
    #[arg(short, long, default_value = "bubble")]
    pub algorithm: String,

    /// Display mode
    #[arg(long, value_enum, default_value_t = ViewArg::Circle)]
    pub view: ViewArg,

    /// Multiplier applied to every frame hold (2.0 = half speed)
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Skip all frame holds
    #[arg(long)]
    pub instant: bool,

    /// Seed for array generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Explicit comma separated values, e.g. 5,3,8,1
    #[arg(long)]
    pub values: Option<String>,

    /// Print frames as plain text and sort immediately instead of the fullscreen UI
    #[arg(long)]
    pub plain: bool,
}

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub size: usize,
    pub algorithm: Algorithm,
    pub view: ViewMode,
    pub speed: f64,
    pub instant: bool,
    pub seed: Option<u64>,
    pub values: Option<Vec<i32>>,
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            algorithm: Algorithm::default(),
            view: ViewMode::default(),
            speed: 1.0,
            instant: false,
            seed: None,
            values: None,
            plain: false,
        }
    }
}

impl Config {
    /// Pacing for a run of `algorithm` under this config.
    pub fn pacing_for(&self, algorithm: Algorithm) -> Pacing {
        if self.instant {
            Pacing::instant()
        } else {
            Pacing::for_algorithm(algorithm).scaled(self.speed)
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let values = cli.values.as_deref().map(parse_values).transpose()?;
        let size = match &values {
            Some(values) => values.len(),
            None => validate_size(cli.size)?,
        };
        if !cli.speed.is_finite() || cli.speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(cli.speed));
        }

        Ok(Self {
            size,
            algorithm: Algorithm::from_name(&cli.algorithm),
            view: cli.view.into(),
            speed: cli.speed,
            instant: cli.instant,
            seed: cli.seed,
            values,
            plain: cli.plain,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Check a generated-array size against `MIN_SIZE..=MAX_SIZE`.
pub fn validate_size(size: usize) -> Result<usize, ConfigError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ConfigError::SizeOutOfRange(size))
    }
}

/// Parse `"5, 3,8,1"` into integers. Empty input yields an empty array.
pub fn parse_values(input: &str) -> Result<Vec<i32>, ConfigError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| ConfigError::InvalidValue(s.to_string()))
        })
        .collect()
}

/// `len` values drawn uniformly from `1..=MAX_VALUE`.
pub fn generate_array<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(1..=MAX_VALUE)).collect()
}
