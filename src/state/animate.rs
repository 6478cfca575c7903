//! Animation Player - paces a sort run for human eyes.
//!
//! The engine stamps every frame with a hold duration. The player delivers a
//! frame, then waits out its hold through a [`Pause`], checking the run's
//! cancel token so a quit request is seen within one slice.
//!
//! # Pattern
//!
//! - `ThreadPause` sleeps on the current thread in short slices
//! - The terminal app supplies its own pause that polls input while waiting
//! - Tests use `RecordedPause`, which never sleeps and logs every hold
//!
//! # Example
//!
//! ```ignore
//! use sortscope::state::animate::{Player, ThreadPause};
//!
//! let mut player = Player::new(ThreadPause::default());
//! let outcome = player.play(&mut run, |frame| store.apply(frame));
//! assert!(!outcome.cancelled);
//! ```

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::engine::{CancelToken, Frame, SortRun};

// =============================================================================
// PAUSE
// =============================================================================

/// How the player waits between frames.
pub trait Pause {
    /// Wait for `hold`, returning early once `cancel` is set.
    fn pause(&mut self, hold: Duration, cancel: &CancelToken);
}

/// Sleeps the current thread in slices of at most `slice`.
#[derive(Debug, Clone, Copy)]
pub struct ThreadPause {
    slice: Duration,
}

impl ThreadPause {
    pub fn with_slice(slice: Duration) -> Self {
        Self { slice: slice.max(Duration::from_millis(1)) }
    }
}

impl Default for ThreadPause {
    fn default() -> Self {
        // ~60fps responsiveness to cancellation
        Self::with_slice(Duration::from_millis(16))
    }
}

impl Pause for ThreadPause {
    fn pause(&mut self, hold: Duration, cancel: &CancelToken) {
        let deadline = Instant::now() + hold;
        while !cancel.is_cancelled() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.slice.min(deadline - now));
        }
    }
}

/// Records holds instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct RecordedPause {
    pub holds: Vec<Duration>,
}

impl RecordedPause {
    pub fn total(&self) -> Duration {
        self.holds.iter().sum()
    }
}

impl Pause for RecordedPause {
    fn pause(&mut self, hold: Duration, _cancel: &CancelToken) {
        self.holds.push(hold);
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// Result of playing a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Frames delivered to the callback.
    pub frames: usize,
    /// True when the run stopped before its done frame.
    pub cancelled: bool,
}

/// Drives a [`SortRun`] frame by frame.
#[derive(Debug, Default)]
pub struct Player<P: Pause> {
    pause: P,
}

impl<P: Pause> Player<P> {
    pub fn new(pause: P) -> Self {
        Self { pause }
    }

    pub fn pause_ref(&self) -> &P {
        &self.pause
    }

    pub fn pause_mut(&mut self) -> &mut P {
        &mut self.pause
    }

    pub fn into_pause(self) -> P {
        self.pause
    }

    /// Deliver every frame of `run` to `on_frame`, holding each one.
    ///
    /// The done frame is delivered but not held.
    pub fn play<T, F>(&mut self, run: &mut SortRun<T>, mut on_frame: F) -> PlayOutcome
    where
        T: PartialOrd + Clone,
        F: FnMut(&Frame<T>),
    {
        let cancel = run.cancel_token();
        let mut frames = 0;
        let mut finished = false;

        while let Some(frame) = run.next() {
            on_frame(&frame);
            frames += 1;
            if frame.done {
                finished = true;
                break;
            }
            self.pause.pause(frame.hold, &cancel);
        }

        let cancelled = !finished;
        if cancelled {
            debug!(algorithm = %run.algorithm(), frames, "playback stopped early");
        }
        PlayOutcome { frames, cancelled }
    }
}

// =============================================================================
// TESTS
// =============================================================================
