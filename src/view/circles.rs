//! Circle view - one `( v )` token per element, wrapped across rows.

use unicode_width::UnicodeWidthStr;

use super::{SceneSnapshot, element_color};
use crate::renderer::FrameBuffer;
use crate::types::Attr;

const GAP: u16 = 1;
/// A blank row between wrapped lines.
const ROW_STRIDE: u16 = 2;

pub(super) fn draw(buffer: &mut FrameBuffer, scene: &SceneSnapshot, x: u16, y: u16, width: u16, height: u16) {
    let right = x.saturating_add(width);
    let bottom = y.saturating_add(height);
    let mut col = x;
    let mut row = y;

    for (index, value) in scene.array.iter().enumerate() {
        let token = format!("( {value} )");
        let token_width = token.width() as u16;

        if col > x && col.saturating_add(token_width) > right {
            col = x;
            row = row.saturating_add(ROW_STRIDE);
        }
        if row >= bottom {
            break;
        }

        let attrs = if scene.active.contains(&index) { Attr::BOLD } else { Attr::NONE };
        buffer.draw_text(col, row, &token, element_color(scene, index), attrs);
        col = col.saturating_add(token_width + GAP);
    }
}
