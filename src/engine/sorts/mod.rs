//! Instrumented sorting algorithms.
//!
//! Each algorithm is a small state machine over its loop counters. One call
//! to [`Stepper::advance`] performs one logical step (a comparison, a shift,
//! a merge write, or a pass boundary) and records the resulting frames.
//! Keeping the loops as explicit state is what makes `SortRun` lazy.

mod bubble;
mod insertion;
mod merge;
mod selection;

use super::algorithm::Algorithm;
use super::recorder::Recorder;

pub(crate) use bubble::BubbleSort;
pub(crate) use insertion::InsertionSort;
pub(crate) use merge::MergeSort;
pub(crate) use selection::SelectionSort;

/// One algorithm, advanced a step at a time.
pub(crate) trait Stepper<T> {
    /// Perform the next step. Returns `false` once the algorithm has finished
    /// and recorded nothing.
    fn advance(&mut self, rec: &mut Recorder<T>) -> bool;
}

/// Build the stepper for `algorithm` over an array of length `len`.
pub(crate) fn stepper_for<T: PartialOrd + Clone + 'static>(
    algorithm: Algorithm,
    len: usize,
) -> Box<dyn Stepper<T>> {
    match algorithm {
        Algorithm::Bubble => Box::new(BubbleSort::new(len)),
        Algorithm::Selection => Box::new(SelectionSort::new(len)),
        Algorithm::Insertion => Box::new(InsertionSort::new(len)),
        Algorithm::Merge => Box::new(MergeSort::new(len)),
    }
}
