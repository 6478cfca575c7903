//! Frame - one immutable snapshot of sorting progress.
//!
//! A run produces frames in causal order. Each frame owns a copy of the
//! array and both index sets, so a consumer can keep, diff, or drop it
//! without ever observing later engine mutations.

use std::collections::BTreeSet;
use std::time::Duration;

// =============================================================================
// Step
// =============================================================================

/// What the engine did to produce a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Elements at the active indices are being compared. Array unchanged.
    Compare,
    /// Two elements were exchanged.
    Swap,
    /// A single position was overwritten (merge write-back).
    Write,
    /// New indices joined the sorted set. Array unchanged.
    Settle,
    /// Terminal frame: every index is sorted.
    Done,
}

impl Step {
    /// True for steps that change the array contents.
    #[inline]
    pub const fn is_update(&self) -> bool {
        matches!(self, Self::Swap | Self::Write)
    }
}

// =============================================================================
// Frame
// =============================================================================

/// An immutable snapshot handed to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T = i32> {
    /// Array contents at this point of the run.
    pub array: Vec<T>,
    /// Indices involved in the current comparison or move.
    pub active: BTreeSet<usize>,
    /// Indices the algorithm has verified as ordered.
    pub sorted: BTreeSet<usize>,
    /// The step that produced this frame.
    pub step: Step,
    /// How long the consumer should hold this frame before pulling the next.
    pub hold: Duration,
    /// Set only on the terminal frame.
    pub done: bool,
}

impl<T> Frame<T> {
    /// Does this frame carry an array change?
    #[inline]
    pub fn is_update(&self) -> bool {
        self.step.is_update()
    }

    /// Is `index` currently highlighted as active?
    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&index)
    }

    /// Is `index` marked sorted?
    #[inline]
    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.contains(&index)
    }

    /// Number of elements in the snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// True when the snapshot holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
