//! Merge sort.
//!
//! Top-down recursion replayed with an explicit work stack so the run can
//! stop after any single write. A `Sort` task splits at `(start + end) / 2`
//! and pushes its merge, right half and left half, so the left half is
//! always finished first. The merge copies both halves when it begins and
//! writes back one position per step, preferring the left run on ties.

use super::Stepper;
use crate::engine::recorder::Recorder;

enum Task<T> {
    Sort { start: usize, end: usize },
    Merge(Merge<T>),
}

struct Merge<T> {
    start: usize,
    mid: usize,
    end: usize,
    runs: Option<(Vec<T>, Vec<T>)>,
    i: usize,
    j: usize,
    k: usize,
}

pub(crate) struct MergeSort<T> {
    stack: Vec<Task<T>>,
}

impl<T> MergeSort<T> {
    pub(crate) fn new(n: usize) -> Self {
        let stack = if n > 1 {
            vec![Task::Sort { start: 0, end: n - 1 }]
        } else {
            Vec::new()
        };
        Self { stack }
    }
}

impl<T: PartialOrd + Clone> Merge<T> {
    fn new(start: usize, mid: usize, end: usize) -> Self {
        Self {
            start,
            mid,
            end,
            runs: None,
            i: 0,
            j: 0,
            k: start,
        }
    }

    /// Write one position. Returns `false` when both runs are exhausted.
    fn step(&mut self, rec: &mut Recorder<T>) -> bool {
        let (left, right) = self.runs.get_or_insert_with(|| {
            (
                rec.copy_range(self.start, self.mid),
                rec.copy_range(self.mid + 1, self.end),
            )
        });

        let value = if self.i < left.len() && self.j < right.len() {
            rec.compare(&[self.k]);
            if left[self.i] <= right[self.j] {
                self.i += 1;
                left[self.i - 1].clone()
            } else {
                self.j += 1;
                right[self.j - 1].clone()
            }
        } else if self.i < left.len() {
            self.i += 1;
            left[self.i - 1].clone()
        } else if self.j < right.len() {
            self.j += 1;
            right[self.j - 1].clone()
        } else {
            return false;
        };

        rec.write(self.k, value);
        self.k += 1;
        true
    }
}

impl<T: PartialOrd + Clone> Stepper<T> for MergeSort<T> {
    fn advance(&mut self, rec: &mut Recorder<T>) -> bool {
        loop {
            match self.stack.last_mut() {
                None => return false,
                Some(Task::Merge(merge)) => {
                    if merge.step(rec) {
                        return true;
                    }
                    self.stack.pop();
                }
                Some(Task::Sort { start, end }) => {
                    let (start, end) = (*start, *end);
                    self.stack.pop();
                    if start < end {
                        let mid = (start + end) / 2;
                        self.stack.push(Task::Merge(Merge::new(start, mid, end)));
                        self.stack.push(Task::Sort { start: mid + 1, end });
                        self.stack.push(Task::Sort { start, end: mid });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::{Frame, Step};
    use crate::engine::pacing::Pacing;

    fn drain(values: Vec<i32>) -> Vec<Frame> {
        let mut sorter = MergeSort::new(values.len());
        let mut rec = Recorder::new(values, Pacing::instant());
        let mut frames = Vec::new();
        while sorter.advance(&mut rec) {
            while let Some(f) = rec.pop_frame() {
                frames.push(f);
            }
        }
        frames
    }

    #[test]
    fn test_two_elements() {
        let frames = drain(vec![2, 1]);
        let steps: Vec<Step> = frames.iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![Step::Compare, Step::Write, Step::Write]);
        assert_eq!(frames[1].array, vec![1, 1]);
        assert_eq!(frames[2].array, vec![1, 2]);
        assert_eq!(frames[2].sorted, [0, 1].into_iter().collect());
    }

    #[test]
    fn test_sorts_odd_length() {
        let frames = drain(vec![7, 3, 9, 1, 5]);
        assert_eq!(frames.last().unwrap().array, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_left_half_first() {
        // [4,3 | 2,1]: first write lands at index 0 (left pair), not index 2.
        let frames = drain(vec![4, 3, 2, 1]);
        let first_write = frames.iter().find(|f| f.step == Step::Write).unwrap();
        assert_eq!(first_write.sorted, [0].into_iter().collect());
    }

    #[test]
    fn test_trivial_lengths_do_nothing() {
        assert!(drain(vec![]).is_empty());
        assert!(drain(vec![1]).is_empty());
    }
}
