//! Sort Store - reactive state the views render from.
//!
//! Every field is a spark-signals `Signal`, so deriveds and effects that read
//! them re-run when a frame is applied or a control changes. The store is the
//! only thing the render side looks at. It never touches the engine.
//!
//! Controls are ignored while a sort is running, which is how the UI keeps the
//! array stable under the active run.

use std::collections::BTreeSet;

use rand::Rng;
use spark_signals::{Signal, batch, signal};
use tracing::debug;

use crate::config::{generate_array, validate_size};
use crate::engine::{Algorithm, Frame};
use crate::error::ConfigError;
use crate::view::{SceneSnapshot, ViewMode};

// =============================================================================
// SortStore
// =============================================================================

/// Reactive visualizer state.
#[derive(Clone)]
pub struct SortStore {
    pub array: Signal<Vec<i32>>,
    pub active: Signal<BTreeSet<usize>>,
    pub sorted: Signal<BTreeSet<usize>>,
    pub is_sorting: Signal<bool>,
    pub algorithm: Signal<Algorithm>,
    pub view: Signal<ViewMode>,
    pub size: Signal<usize>,
}

impl SortStore {
    pub fn new(array: Vec<i32>, algorithm: Algorithm, view: ViewMode) -> Self {
        let size = array.len();
        Self {
            array: signal(array),
            active: signal(BTreeSet::new()),
            sorted: signal(BTreeSet::new()),
            is_sorting: signal(false),
            algorithm: signal(algorithm),
            view: signal(view),
            size: signal(size),
        }
    }

    /// Read every signal into a plain snapshot (tracks all of them).
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            array: self.array.get(),
            active: self.active.get(),
            sorted: self.sorted.get(),
            is_sorting: self.is_sorting.get(),
            algorithm: self.algorithm.get(),
            view: self.view.get(),
        }
    }

    // -------------------------------------------------------------------------
    // Run lifecycle
    // -------------------------------------------------------------------------

    /// Enter the sorting state. Returns false if already sorting.
    pub fn begin_sort(&self) -> bool {
        if self.is_sorting.get() {
            return false;
        }
        batch(|| {
            self.active.set(BTreeSet::new());
            self.sorted.set(BTreeSet::new());
            self.is_sorting.set(true);
        });
        true
    }

    /// Publish one frame. A done frame also leaves the sorting state.
    ///
    /// All fields change in one batch, so observers only ever see whole frames.
    pub fn apply(&self, frame: &Frame<i32>) {
        batch(|| {
            self.array.set(frame.array.clone());
            self.active.set(frame.active.clone());
            self.sorted.set(frame.sorted.clone());
            if frame.done {
                self.is_sorting.set(false);
            }
        });
    }

    /// Leave the sorting state without a done frame (cancelled run).
    pub fn abort_sort(&self) {
        batch(|| {
            self.active.set(BTreeSet::new());
            self.is_sorting.set(false);
        });
    }

    // -------------------------------------------------------------------------
    // Controls
    // -------------------------------------------------------------------------

    /// Replace the array with fresh random values of the current size.
    pub fn reset_array<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if self.is_sorting.get() {
            debug!("reset ignored while sorting");
            return false;
        }
        self.replace_array(generate_array(self.size.get(), rng));
        true
    }

    /// Change the generated array size and regenerate.
    ///
    /// Returns `Ok(false)` while sorting, `Err` if `size` is out of bounds.
    pub fn set_size<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<bool, ConfigError> {
        let size = validate_size(size)?;
        if self.is_sorting.get() {
            debug!(size, "size change ignored while sorting");
            return Ok(false);
        }
        let array = generate_array(size, rng);
        batch(|| {
            self.size.set(size);
            self.replace_array(array);
        });
        Ok(true)
    }

    pub fn set_algorithm(&self, algorithm: Algorithm) -> bool {
        if self.is_sorting.get() {
            return false;
        }
        batch(|| {
            self.algorithm.set(algorithm);
            self.sorted.set(BTreeSet::new());
        });
        true
    }

    pub fn set_view(&self, view: ViewMode) -> bool {
        if self.is_sorting.get() {
            return false;
        }
        self.view.set(view);
        true
    }

    fn replace_array(&self, array: Vec<i32>) {
        batch(|| {
            self.active.set(BTreeSet::new());
            self.sorted.set(BTreeSet::new());
            self.array.set(array);
        });
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Pacing, SortEngine};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spark_signals::effect;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn store() -> SortStore {
        SortStore::new(vec![5, 3, 8, 1], Algorithm::Bubble, ViewMode::Bar)
    }

    #[test]
    fn test_apply_frames_to_completion() {
        let store = store();
        assert!(store.begin_sort());
        let engine = SortEngine::with_pacing(Pacing::instant());
        for frame in engine.run(store.array.get(), store.algorithm.get()).unwrap() {
            store.apply(&frame);
        }
        assert_eq!(store.array.get(), vec![1, 3, 5, 8]);
        assert!(store.active.get().is_empty());
        assert_eq!(store.sorted.get().len(), 4);
        assert!(!store.is_sorting.get());
    }

    #[test]
    fn test_begin_sort_twice_is_noop() {
        let store = store();
        assert!(store.begin_sort());
        assert!(!store.begin_sort());
    }

    #[test]
    fn test_controls_locked_while_sorting() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(1);
        store.begin_sort();

        assert!(!store.reset_array(&mut rng));
        assert_eq!(store.set_size(12, &mut rng), Ok(false));
        assert!(!store.set_algorithm(Algorithm::Merge));
        assert!(!store.set_view(ViewMode::Circle));

        assert_eq!(store.array.get(), vec![5, 3, 8, 1]);
        assert_eq!(store.algorithm.get(), Algorithm::Bubble);
        assert_eq!(store.view.get(), ViewMode::Bar);
    }

    #[test]
    fn test_set_size_regenerates() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(store.set_size(12, &mut rng), Ok(true));
        assert_eq!(store.array.get().len(), 12);
        assert_eq!(store.size.get(), 12);
        assert_eq!(store.set_size(2, &mut rng), Err(ConfigError::SizeOutOfRange(2)));
        assert_eq!(store.array.get().len(), 12);
    }

    #[test]
    fn test_reset_clears_sorted() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(3);
        store.sorted.set([0, 1].into_iter().collect());
        store.size.set(6);
        assert!(store.reset_array(&mut rng));
        assert!(store.sorted.get().is_empty());
        assert_eq!(store.array.get().len(), 6);
    }

    #[test]
    fn test_abort_leaves_sorting_state() {
        let store = store();
        store.begin_sort();
        store.active.set([1].into_iter().collect());
        store.abort_sort();
        assert!(!store.is_sorting.get());
        assert!(store.active.get().is_empty());
    }

    #[test]
    fn test_effect_sees_whole_frames_only() {
        let store = store();
        let seen: Rc<RefCell<Vec<SceneSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_in_effect = seen.clone();
        let observed = store.clone();
        let _stop = effect(move || {
            seen_in_effect.borrow_mut().push(observed.snapshot());
        });
        assert_eq!(seen.borrow().len(), 1);

        store.begin_sort();
        assert_eq!(seen.borrow().len(), 2);

        let engine = SortEngine::with_pacing(Pacing::instant());
        for frame in engine.run(store.array.get(), Algorithm::Bubble).unwrap() {
            let before = seen.borrow().len();
            store.apply(&frame);
            assert_eq!(seen.borrow().len(), before + 1, "{:?} frame re-ran the effect more than once", frame.step);

            let last = seen.borrow().last().cloned().unwrap();
            assert_eq!(last.array, frame.array);
            assert_eq!(last.active, frame.active);
            assert_eq!(last.sorted, frame.sorted);
            assert_eq!(last.is_sorting, !frame.done);
        }
    }

    #[test]
    fn test_controls_notify_once() {
        let store = store();
        let runs = Rc::new(Cell::new(0));
        let runs_in_effect = runs.clone();
        let observed = store.clone();
        let _stop = effect(move || {
            let _ = observed.snapshot();
            runs_in_effect.set(runs_in_effect.get() + 1);
        });
        let mut rng = StdRng::seed_from_u64(4);

        store.sorted.set([0].into_iter().collect());
        let before = runs.get();
        store.reset_array(&mut rng);
        assert_eq!(runs.get(), before + 1);

        store.sorted.set([0].into_iter().collect());
        let before = runs.get();
        store.set_algorithm(Algorithm::Merge);
        assert_eq!(runs.get(), before + 1);
    }

    #[test]
    fn test_snapshot_reads_all_fields() {
        let store = store();
        let scene = store.snapshot();
        assert_eq!(scene.array, vec![5, 3, 8, 1]);
        assert_eq!(scene.algorithm, Algorithm::Bubble);
        assert_eq!(scene.view, ViewMode::Bar);
        assert!(!scene.is_sorting);
    }
}
