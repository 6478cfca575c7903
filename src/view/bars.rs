//! Bar view - one column per element.
//!
//! Columns stand on a common baseline at the bottom of the area. Height is
//! proportional to value (largest value fills the area minus the label row)
//! and every value is printed just above its bar. Non-positive values get
//! a label and no bar.

use unicode_width::UnicodeWidthStr;

use super::{SceneSnapshot, element_color};
use crate::renderer::FrameBuffer;
use crate::types::Attr;

const BAR: char = '█';
const GAP: u16 = 1;

/// Rows of bar for `value` when `max` maps to `rows`.
fn bar_height(value: i32, max: i32, rows: u16) -> u16 {
    if value <= 0 || rows == 0 {
        return 0;
    }
    let max = max.max(1) as u64;
    let scaled = (value as u64 * u64::from(rows)).div_ceil(max);
    scaled.clamp(1, u64::from(rows)) as u16
}

/// Left edge of slot `index` when `len` slots share `width` columns.
fn slot_start(index: usize, len: usize, width: u16) -> u16 {
    (index as u64 * u64::from(width) / len as u64) as u16
}

pub(super) fn draw(buffer: &mut FrameBuffer, scene: &SceneSnapshot, x: u16, y: u16, width: u16, height: u16) {
    let len = scene.array.len();
    if len == 0 {
        return;
    }
    let labels: Vec<String> = scene.array.iter().map(i32::to_string).collect();
    let column = labels.iter().map(|l| l.width()).max().unwrap_or(1).max(1) as u16;
    let max = scene.array.iter().copied().max().unwrap_or(1);
    let baseline = y + height - 1;
    let rows = height - 1;

    // Spaced columns when they fit, otherwise every element gets an equal share
    let spaced = len as u64 * u64::from(column + GAP) - u64::from(GAP) <= u64::from(width);

    for (index, (value, label)) in scene.array.iter().zip(&labels).enumerate() {
        let (col_x, span) = if spaced {
            (x + index as u16 * (column + GAP), column)
        } else {
            let start = slot_start(index, len, width);
            let end = slot_start(index + 1, len, width);
            (x + start, end.saturating_sub(start).max(1))
        };
        let color = element_color(scene, index);
        let attrs = if scene.active.contains(&index) { Attr::BOLD } else { Attr::NONE };

        let bar = bar_height(*value, max, rows);
        if bar > 0 {
            buffer.fill_rect(col_x, baseline + 1 - bar, column.min(span), bar, BAR, color, None);
        }
        // Labels wider than the slot are cut so they never spill onto a neighbour
        let label: String = label.chars().take(span as usize).collect();
        buffer.draw_text_centered(col_x, baseline - bar, span, &label, color, attrs);
    }
}
