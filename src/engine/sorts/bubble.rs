//! Bubble sort.
//!
//! Pass `i` walks `j` over `0..n-i-1`, comparing neighbours and swapping on a
//! strict inversion, so equal elements keep their order. After each pass the
//! slot `n-i-1` holds the pass maximum and is settled.

use super::Stepper;
use crate::engine::recorder::Recorder;

pub(crate) struct BubbleSort {
    n: usize,
    i: usize,
    j: usize,
}

impl BubbleSort {
    pub(crate) fn new(n: usize) -> Self {
        // Nothing to pass over with fewer than two elements
        let i = if n < 2 { n } else { 0 };
        Self { n, i, j: 0 }
    }
}

impl<T: PartialOrd + Clone> Stepper<T> for BubbleSort {
    fn advance(&mut self, rec: &mut Recorder<T>) -> bool {
        if self.i >= self.n {
            return false;
        }

        let pass_end = self.n - self.i - 1;
        if self.j < pass_end {
            let j = self.j;
            rec.compare(&[j, j + 1]);
            if rec.get(j) > rec.get(j + 1) {
                rec.swap(j, j + 1);
            }
            self.j += 1;
        } else {
            rec.settle([pass_end]);
            self.i += 1;
            self.j = 0;
        }
        true
    }
}
