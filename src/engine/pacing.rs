//! Pacing - how long each kind of frame is held on screen.
//!
//! The engine never sleeps. It stamps each frame with a hold duration and
//! the consumer decides how to wait (see `state::animate`). A zero pacing
//! turns a run into a plain trace, which is what the tests use.

use std::time::Duration;

use super::algorithm::Algorithm;
use super::frame::Step;

/// Per-step hold durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub compare: Duration,
    pub swap: Duration,
    pub write: Duration,
    pub settle: Duration,
}

impl Pacing {
    /// No holds at all.
    pub const fn instant() -> Self {
        Self {
            compare: Duration::ZERO,
            swap: Duration::ZERO,
            write: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }

    /// Reference cadence for an algorithm.
    pub const fn for_algorithm(algorithm: Algorithm) -> Self {
        let (compare, swap, write) = match algorithm {
            Algorithm::Bubble => (300, 100, 100),
            Algorithm::Selection => (200, 300, 300),
            Algorithm::Insertion => (300, 300, 300),
            Algorithm::Merge => (300, 200, 200),
        };
        Self {
            compare: Duration::from_millis(compare),
            swap: Duration::from_millis(swap),
            write: Duration::from_millis(write),
            settle: Duration::ZERO,
        }
    }

    /// Multiply every hold by `factor`. Non-finite or negative factors yield instant pacing.
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::instant();
        }
        let scale = |d: Duration| Duration::from_nanos((d.as_nanos() as f64 * factor).round() as u64);
        Self {
            compare: scale(self.compare),
            swap: scale(self.swap),
            write: scale(self.write),
            settle: scale(self.settle),
        }
    }

    /// Hold for a given step. Done frames are never held.
    pub const fn hold_for(&self, step: Step) -> Duration {
        match step {
            Step::Compare => self.compare,
            Step::Swap => self.swap,
            Step::Write => self.write,
            Step::Settle => self.settle,
            Step::Done => Duration::ZERO,
        }
    }

    pub fn is_instant(&self) -> bool {
        *self == Self::instant()
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::for_algorithm(Algorithm::default())
    }
}
