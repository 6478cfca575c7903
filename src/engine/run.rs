//! SortEngine and SortRun - starting runs and pulling their frames.
//!
//! The engine owns a single running flag. A run claims the flag when it is
//! created and hands it back when it emits its Done frame, is cancelled, or
//! is dropped, so at most one run per engine is ever alive.
//!
//! # Example
//!
//! ```ignore
//! use sortscope::engine::{Algorithm, Pacing, SortEngine};
//!
//! let engine = SortEngine::with_pacing(Pacing::instant());
//! let run = engine.run(vec![5, 3, 8, 1], Algorithm::Bubble).unwrap();
//! let last = run.last().unwrap();
//! assert_eq!(last.array, vec![1, 3, 5, 8]);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use super::algorithm::Algorithm;
use super::frame::Frame;
use super::pacing::Pacing;
use super::recorder::Recorder;
use super::sorts::{Stepper, stepper_for};

// =============================================================================
// CancelToken
// =============================================================================

/// Cooperative cancellation flag, checked before every frame is produced.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// =============================================================================
// RunGuard
// =============================================================================

/// Holds the engine's running flag for the lifetime of a run.
struct RunGuard {
    running: Arc<AtomicBool>,
}

impl RunGuard {
    fn acquire(running: &Arc<AtomicBool>) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                running: running.clone(),
            })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// SortEngine
// =============================================================================

/// Starts sort runs and enforces the single-active-run rule.
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    running: Arc<AtomicBool>,
    pacing: Option<Pacing>,
}

impl SortEngine {
    /// Engine using each algorithm's reference cadence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine using one pacing for every algorithm.
    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            pacing: Some(pacing),
        }
    }

    /// Pacing for later runs. A run already in flight keeps the pacing it started with.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = Some(pacing);
    }

    /// True while a run from this engine is alive and not yet done.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a run. Returns `None` without side effects if one is already in progress.
    pub fn run<T>(&self, array: Vec<T>, algorithm: Algorithm) -> Option<SortRun<T>>
    where
        T: PartialOrd + Clone + 'static,
    {
        self.run_with_cancel(array, algorithm, CancelToken::new())
    }

    /// Start a run that stops early once `cancel` is set.
    pub fn run_with_cancel<T>(
        &self,
        array: Vec<T>,
        algorithm: Algorithm,
        cancel: CancelToken,
    ) -> Option<SortRun<T>>
    where
        T: PartialOrd + Clone + 'static,
    {
        let Some(guard) = RunGuard::acquire(&self.running) else {
            debug!(%algorithm, "sort run already in progress; ignoring start request");
            return None;
        };

        let pacing = self
            .pacing
            .unwrap_or_else(|| Pacing::for_algorithm(algorithm));
        let len = array.len();
        info!(%algorithm, len, "starting sort run");

        let stepper = stepper_for(algorithm, len);
        Some(SortRun {
            algorithm,
            recorder: Recorder::new(array, pacing),
            stepper,
            cancel,
            guard: Some(guard),
            finished: false,
            cancelled: false,
            emitted: 0,
        })
    }
}

// =============================================================================
// SortRun
// =============================================================================

/// A lazy, non-restartable stream of frames for one run.
pub struct SortRun<T> {
    algorithm: Algorithm,
    recorder: Recorder<T>,
    stepper: Box<dyn Stepper<T>>,
    cancel: CancelToken,
    guard: Option<RunGuard>,
    finished: bool,
    cancelled: bool,
    emitted: usize,
}

impl<T> SortRun<T> {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// True if the run ended because its token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Frames handed out so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// A handle that cancels this run.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn release(&mut self) {
        self.guard.take();
    }
}

impl<T: PartialOrd + Clone> Iterator for SortRun<T> {
    type Item = Frame<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cancelled {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.cancelled = true;
            self.finished = true;
            self.release();
            debug!(algorithm = %self.algorithm, emitted = self.emitted, "sort run cancelled");
            return None;
        }

        while !self.recorder.has_pending() && !self.finished {
            if !self.stepper.advance(&mut self.recorder) {
                self.recorder.finish();
                self.finished = true;
            }
        }

        let frame = self.recorder.pop_frame()?;
        self.emitted += 1;
        if frame.done {
            self.release();
            debug!(algorithm = %self.algorithm, frames = self.emitted, "sort run complete");
        }
        Some(frame)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::Step;

    fn engine() -> SortEngine {
        SortEngine::with_pacing(Pacing::instant())
    }

    #[test]
    fn test_empty_array_single_done_frame() {
        let frames: Vec<Frame> = engine().run(vec![], Algorithm::Merge).unwrap().collect();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].done);
        assert!(frames[0].sorted.is_empty());
    }

    #[test]
    fn test_second_run_rejected_while_active() {
        let engine = engine();
        let mut first = engine.run(vec![3, 2, 1], Algorithm::Bubble).unwrap();
        let before = first.next().unwrap();
        assert!(engine.is_running());

        assert!(engine.run(vec![9, 8], Algorithm::Selection).is_none());

        let rest: Vec<Frame> = first.collect();
        assert_eq!(before.array, vec![3, 2, 1]);
        assert_eq!(rest.last().unwrap().array, vec![1, 2, 3]);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_flag_released_on_done_frame() {
        let engine = engine();
        let mut run = engine.run(vec![2, 1], Algorithm::Insertion).unwrap();
        let mut last = None;
        while let Some(frame) = run.next() {
            if frame.done {
                assert!(!engine.is_running());
            } else {
                assert!(engine.is_running());
            }
            last = Some(frame);
        }
        assert!(last.unwrap().done);
        // run still in scope, but the engine accepts a new one
        assert!(engine.run(vec![1], Algorithm::Bubble).is_some());
    }

    #[test]
    fn test_flag_released_on_drop() {
        let engine = engine();
        let run = engine.run(vec![3, 1, 2], Algorithm::Merge).unwrap();
        drop(run);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_cancel_stops_stream() {
        let engine = engine();
        let cancel = CancelToken::new();
        let mut run = engine
            .run_with_cancel(vec![5, 4, 3, 2, 1], Algorithm::Bubble, cancel.clone())
            .unwrap();
        assert!(run.next().is_some());
        cancel.cancel();
        assert!(run.next().is_none());
        assert!(run.is_cancelled());
        assert!(!engine.is_running());
        assert!(run.next().is_none());
    }

    #[test]
    fn test_lazy_production() {
        let engine = engine();
        let mut run = engine.run((0..30).rev().collect::<Vec<i32>>(), Algorithm::Bubble).unwrap();
        let first = run.next().unwrap();
        assert_eq!(first.step, Step::Compare);
        assert_eq!(run.emitted(), 1);
    }

    #[test]
    fn test_reference_pacing_used_by_default() {
        let engine = SortEngine::new();
        let mut run = engine.run(vec![2, 1], Algorithm::Selection).unwrap();
        let frame = run.next().unwrap();
        assert_eq!(frame.hold, Pacing::for_algorithm(Algorithm::Selection).compare);
    }

    #[test]
    fn test_set_pacing_applies_to_next_run() {
        let mut engine = SortEngine::new();
        engine.set_pacing(Pacing::instant());
        let frame = engine.run(vec![2, 1], Algorithm::Merge).unwrap().next().unwrap();
        assert_eq!(frame.hold, std::time::Duration::ZERO);
    }
}
