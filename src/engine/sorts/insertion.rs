//! Insertion sort.
//!
//! Element `i` is walked left while its left neighbour is strictly greater.
//! Each check records a comparison of the pair; each shift records a swap.
//! Once it stops, the prefix `0..=i` is settled.

use super::Stepper;
use crate::engine::recorder::Recorder;

pub(crate) struct InsertionSort {
    n: usize,
    i: usize,
    j: usize,
}

impl InsertionSort {
    pub(crate) fn new(n: usize) -> Self {
        Self { n, i: 1, j: 1 }
    }
}

impl<T: PartialOrd + Clone> Stepper<T> for InsertionSort {
    fn advance(&mut self, rec: &mut Recorder<T>) -> bool {
        if self.i >= self.n {
            return false;
        }

        if self.j > 0 {
            let j = self.j;
            rec.compare(&[j - 1, j]);
            if rec.get(j - 1) > rec.get(j) {
                rec.swap(j - 1, j);
                self.j -= 1;
                return true;
            }
        }

        rec.settle(0..=self.i);
        self.i += 1;
        self.j = self.i;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::{Frame, Step};
    use crate::engine::pacing::Pacing;

    fn drain(values: Vec<i32>) -> Vec<Frame> {
        let mut sorter = InsertionSort::new(values.len());
        let mut rec = Recorder::new(values, Pacing::instant());
        let mut frames = Vec::new();
        while Stepper::<i32>::advance(&mut sorter, &mut rec) {
            while let Some(f) = rec.pop_frame() {
                frames.push(f);
            }
        }
        frames
    }

    #[test]
    fn test_sorts() {
        let frames = drain(vec![4, 2, 5, 1, 3]);
        assert_eq!(frames.last().unwrap().array, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shift_to_front() {
        let frames = drain(vec![2, 3, 1]);
        let steps: Vec<Step> = frames.iter().map(|f| f.step).collect();
        assert_eq!(
            steps,
            vec![
                Step::Compare, // 2 vs 3
                Step::Settle,
                Step::Compare, // 3 vs 1
                Step::Swap,
                Step::Compare, // 2 vs 1
                Step::Swap,
                Step::Settle,
            ]
        );
    }

    #[test]
    fn test_prefix_settled() {
        let frames = drain(vec![3, 1, 2]);
        let first_settle = frames.iter().find(|f| f.step == Step::Settle).unwrap();
        assert_eq!(first_settle.sorted, [0, 1].into_iter().collect());
    }
}
