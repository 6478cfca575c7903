//! Recorder - the mutable run state shared by every algorithm stepper.
//!
//! Steppers never build frames themselves. They call `compare`, `swap`,
//! `write` and `settle`, and the recorder snapshots the array and index
//! sets into a queue that `SortRun` drains.

use std::collections::{BTreeSet, VecDeque};

use super::frame::{Frame, Step};
use super::pacing::Pacing;

pub(crate) struct Recorder<T> {
    array: Vec<T>,
    active: BTreeSet<usize>,
    sorted: BTreeSet<usize>,
    pacing: Pacing,
    pending: VecDeque<Frame<T>>,
}

impl<T: Clone> Recorder<T> {
    pub(crate) fn new(array: Vec<T>, pacing: Pacing) -> Self {
        Self {
            array,
            active: BTreeSet::new(),
            sorted: BTreeSet::new(),
            pacing,
            pending: VecDeque::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.array.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &T {
        &self.array[index]
    }

    /// Copy of `array[start..=end]`.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> Vec<T> {
        self.array[start..=end].to_vec()
    }

    pub(crate) fn pop_frame(&mut self) -> Option<Frame<T>> {
        self.pending.pop_front()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // -------------------------------------------------------------------------
    // Step emitters
    // -------------------------------------------------------------------------

    /// Highlight `indices` for a comparison.
    pub(crate) fn compare(&mut self, indices: &[usize]) {
        self.active = indices.iter().copied().collect();
        self.emit(Step::Compare, false);
    }

    /// Exchange two elements and highlight them.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
        self.active = [a, b].into_iter().collect();
        self.emit(Step::Swap, false);
    }

    /// Overwrite one position and mark it sorted.
    pub(crate) fn write(&mut self, index: usize, value: T) {
        self.array[index] = value;
        self.active = [index].into_iter().collect();
        self.sorted.insert(index);
        self.emit(Step::Write, false);
    }

    /// Add `indices` to the sorted set. Active set is left as is.
    pub(crate) fn settle(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.sorted.extend(indices);
        self.emit(Step::Settle, false);
    }

    /// Terminal frame: clear active, mark everything sorted.
    pub(crate) fn finish(&mut self) {
        self.active.clear();
        self.sorted = (0..self.array.len()).collect();
        self.emit(Step::Done, true);
    }

    fn emit(&mut self, step: Step, done: bool) {
        self.pending.push_back(Frame {
            array: self.array.clone(),
            active: self.active.clone(),
            sorted: self.sorted.clone(),
            step,
            hold: self.pacing.hold_for(step),
            done,
        });
    }
}
