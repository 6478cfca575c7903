//! Sort Engine - instrumented sorting algorithms that emit frames.
//!
//! The engine turns `(array, algorithm)` into a lazy stream of [`Frame`]s:
//!
//! ```text
//! SortEngine::run ──► SortRun (Iterator) ──► Stepper::advance ──► Recorder ──► Frame
//! ```
//!
//! - **Stepper**: one state machine per algorithm, one logical step per call
//! - **Recorder**: owns the array during the run and snapshots it into frames
//! - **SortRun**: drains recorded frames, refilling one step at a time
//!
//! Nothing here sleeps or renders. Each frame carries a `hold` duration that
//! the consumer honours (see `state::animate::Player`).

mod algorithm;
mod frame;
mod pacing;
mod recorder;
mod run;
mod sorts;

pub use algorithm::Algorithm;
pub use frame::{Frame, Step};
pub use pacing::Pacing;
pub use run::{CancelToken, SortEngine, SortRun};
