//! Selection sort.
//!
//! For each `i` the scan tracks the running minimum; every comparison
//! highlights `{i, j, min}`. A swap is recorded only when the minimum moved.

use super::Stepper;
use crate::engine::recorder::Recorder;

pub(crate) struct SelectionSort {
    n: usize,
    i: usize,
    j: usize,
    min: usize,
}

impl SelectionSort {
    pub(crate) fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1, min: 0 }
    }
}

impl<T: PartialOrd + Clone> Stepper<T> for SelectionSort {
    fn advance(&mut self, rec: &mut Recorder<T>) -> bool {
        if self.i + 1 >= self.n {
            return false;
        }

        if self.j < self.n {
            rec.compare(&[self.i, self.j, self.min]);
            if rec.get(self.j) < rec.get(self.min) {
                self.min = self.j;
            }
            self.j += 1;
        } else {
            if self.min != self.i {
                rec.swap(self.i, self.min);
            }
            rec.settle([self.i]);
            self.i += 1;
            self.j = self.i + 1;
            self.min = self.i;
        }
        true
    }
}
