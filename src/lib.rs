//! # sortscope
//!
//! Animated sorting algorithm visualizer for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! The sort engine knows nothing about rendering. It turns an array and an
//! algorithm into a lazy stream of frames; the app feeds those frames into a
//! reactive store and a render effect repaints whenever the store changes:
//! ```text
//! SortEngine → SortRun (frames) → Player → SortStore (signals) → compose → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Instrumented sorts, frames, pacing, run lifecycle
//! - [`state`] - Reactive store, playback, key handling
//! - [`view`] - Bar and circle views composed into a frame buffer
//! - [`renderer`] - Terminal renderer (ANSI output, diff rendering)
//! - [`types`] - Cells, colors, attributes
//! - [`config`] / [`error`] - CLI surface and error types
//! - [`app`] - Fullscreen and plain front ends

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod state;
pub mod types;
pub mod view;

pub use engine::{Algorithm, CancelToken, Frame, Pacing, SortEngine, SortRun, Step};
pub use error::{ConfigError, Result, VisualizerError};
pub use renderer::{DiffRenderer, FrameBuffer};
pub use state::{Command, Player, SortStore};
pub use types::{Attr, Cell, Rgba};
pub use view::{SceneSnapshot, ViewMode, compose};
