//! Views - turn a scene snapshot into a grid of cells.
//!
//! ```text
//! SortStore::snapshot ──► SceneSnapshot ──► compose ──► FrameBuffer
//! ```
//!
//! Views are pure: the same snapshot and size always produce the same
//! buffer. They read nothing reactive themselves, so the app decides when
//! to recompose.

mod bars;
mod circles;

use std::collections::BTreeSet;
use std::fmt;

use crate::engine::Algorithm;
use crate::renderer::FrameBuffer;
use crate::types::{Attr, Rgba};

// =============================================================================
// ViewMode
// =============================================================================

/// How the array is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// One vertical bar per element, height proportional to value.
    Bar,
    /// One `( v )` token per element.
    #[default]
    Circle,
}

impl ViewMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Bar => Self::Circle,
            Self::Circle => Self::Bar,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// SceneSnapshot
// =============================================================================

/// Everything a view needs, read out of the store in one go.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneSnapshot {
    pub array: Vec<i32>,
    pub active: BTreeSet<usize>,
    pub sorted: BTreeSet<usize>,
    pub is_sorting: bool,
    pub algorithm: Algorithm,
    pub view: ViewMode,
}

impl SceneSnapshot {
    /// Every index marked sorted, outside of a run.
    pub fn is_fully_sorted(&self) -> bool {
        !self.is_sorting && !self.array.is_empty() && self.sorted.len() == self.array.len()
    }
}

// =============================================================================
// Palette
// =============================================================================

pub const ACTIVE_COLOR: Rgba = Rgba::RED_500;
pub const SORTED_COLOR: Rgba = Rgba::GREEN_500;
pub const IDLE_COLOR: Rgba = Rgba::BLUE_500;

/// Color of element `index`. Active wins over sorted.
pub fn element_color(scene: &SceneSnapshot, index: usize) -> Rgba {
    if scene.active.contains(&index) {
        ACTIVE_COLOR
    } else if scene.sorted.contains(&index) {
        SORTED_COLOR
    } else {
        IDLE_COLOR
    }
}

// =============================================================================
// Compose
// =============================================================================

const HINT_IDLE: &str = "[s] start  [r] reset  [a] algorithm  [v] view  [+/-] size  [q] quit";
const HINT_SORTING: &str = "sorting...  [q] quit";

/// Rows used by title, hint and status (plus one blank row).
const HEADER_ROWS: u16 = 4;
const MARGIN: u16 = 2;

pub fn title(algorithm: Algorithm) -> String {
    format!("Currently Visualizing: {} sort", algorithm.label())
}

fn status(scene: &SceneSnapshot) -> String {
    let phase = if scene.is_sorting {
        "sorting"
    } else if scene.is_fully_sorted() {
        "sorted"
    } else {
        "ready"
    };
    format!("size {} | view {} | {}", scene.array.len(), scene.view, phase)
}

/// Draw a whole screen for `scene`.
pub fn compose(scene: &SceneSnapshot, width: u16, height: u16) -> FrameBuffer {
    let mut buffer = FrameBuffer::new(width, height);

    buffer.draw_text_centered(0, 0, width, &title(scene.algorithm), Rgba::WHITE, Attr::BOLD);
    let hint = if scene.is_sorting { HINT_SORTING } else { HINT_IDLE };
    buffer.draw_text_centered(0, 1, width, hint, Rgba::GRAY, Attr::DIM);
    buffer.draw_text_centered(0, 2, width, &status(scene), Rgba::GRAY, Attr::NONE);

    let area_width = width.saturating_sub(MARGIN * 2);
    let area_height = height.saturating_sub(HEADER_ROWS);
    if area_width > 0 && area_height > 0 {
        match scene.view {
            ViewMode::Bar => bars::draw(&mut buffer, scene, MARGIN, HEADER_ROWS, area_width, area_height),
            ViewMode::Circle => circles::draw(&mut buffer, scene, MARGIN, HEADER_ROWS, area_width, area_height),
        }
    }

    buffer
}
