//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells holding one composed scene. Views
//! draw into it; the renderer diffs and outputs it; plain mode flattens it
//! to text.
//!
//! Storage is flat and row-major: `index = y * width + x`. Every drawing call
//! silently clips at the buffer edge.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell. A `None` background keeps whatever is underneath.
    ///
    /// Returns true if the cell was inside the buffer.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> bool {
        let Some(cell) = self.get_mut(x, y) else {
            return false;
        };
        cell.char = ch as u32;
        cell.fg = fg;
        if let Some(bg) = bg {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with one character.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, ch: char, fg: Rgba, bg: Option<Rgba>) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                self.set_cell(col, row, ch, fg, bg, Attr::NONE);
            }
        }
    }

    /// Draw text starting at (x, y). Returns the number of columns used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, attrs: Attr) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let char_width = ch.width().unwrap_or(0) as u16;
            if char_width == 0 {
                continue;
            }

            self.set_cell(col, y, ch, fg, None, attrs);
            if char_width == 2 {
                // Continuation marker for the right half of a wide char
                if let Some(next) = self.get_mut(col + 1, y) {
                    next.char = 0;
                    next.fg = fg;
                    next.attrs = attrs;
                }
            }
            col = col.saturating_add(char_width);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within `width` columns starting at `x`.
    pub fn draw_text_centered(&mut self, x: u16, y: u16, width: u16, text: &str, fg: Rgba, attrs: Attr) -> u16 {
        let text_width = text.width();
        if text_width >= width as usize {
            return self.draw_text(x, y, text, fg, attrs);
        }
        let offset = ((width as usize - text_width) / 2) as u16;
        self.draw_text(x + offset, y, text, fg, attrs)
    }

    /// Flatten to text, one line per row, trailing spaces trimmed.
    ///
    /// Colors and attributes are dropped. Used by plain mode and tests.
    pub fn to_plain_string(&self) -> String {
        let mut lines: Vec<String> = self
            .cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                let line: String = row
                    .iter()
                    .filter(|cell| cell.char != 0)
                    .filter_map(|cell| char::from_u32(cell.char))
                    .collect();
                line.trim_end().to_string()
            })
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert!(buffer.get(80, 0).is_none());
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut buffer = FrameBuffer::new(4, 4);
        assert!(buffer.set_cell(3, 3, 'X', Rgba::RED_500, Some(Rgba::BLACK), Attr::BOLD));
        assert!(!buffer.set_cell(4, 0, 'X', Rgba::RED_500, None, Attr::NONE));

        let cell = buffer.get(3, 3).unwrap();
        assert_eq!(cell.char, 'X' as u32);
        assert_eq!(cell.fg, Rgba::RED_500);
        assert_eq!(cell.bg, Rgba::BLACK);
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = FrameBuffer::new(5, 5);
        buffer.fill_rect(3, 3, 10, 10, '#', Rgba::BLUE_500, Some(Rgba::BLUE_500));

        assert_eq!(buffer.get(4, 4).unwrap().bg, Rgba::BLUE_500);
        assert_eq!(buffer.get(2, 3).unwrap().bg, Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_draw_text() {
        let mut buffer = FrameBuffer::new(20, 2);
        let used = buffer.draw_text(1, 0, "Hello", Rgba::WHITE, Attr::NONE);
        assert_eq!(used, 5);
        assert_eq!(buffer.get(1, 0).unwrap().char, 'H' as u32);
        assert_eq!(buffer.get(5, 0).unwrap().char, 'o' as u32);
    }

    #[test]
    fn test_draw_text_truncates_at_edge() {
        let mut buffer = FrameBuffer::new(3, 1);
        assert_eq!(buffer.draw_text(0, 0, "abcdef", Rgba::WHITE, Attr::NONE), 3);
        assert_eq!(buffer.to_plain_string(), "abc");
    }

    #[test]
    fn test_draw_text_centered() {
        let mut buffer = FrameBuffer::new(10, 1);
        buffer.draw_text_centered(0, 0, 10, "ab", Rgba::WHITE, Attr::NONE);
        assert_eq!(buffer.to_plain_string(), "    ab");
    }

    #[test]
    fn test_wide_char_continuation() {
        let mut buffer = FrameBuffer::new(6, 1);
        assert_eq!(buffer.draw_text(0, 0, "中x", Rgba::WHITE, Attr::NONE), 3);
        assert_eq!(buffer.get(1, 0).unwrap().char, 0);
        assert_eq!(buffer.to_plain_string(), "中x");
    }

    #[test]
    fn test_plain_string_drops_trailing_blank_rows() {
        let mut buffer = FrameBuffer::new(4, 3);
        buffer.draw_text(0, 0, "ab", Rgba::WHITE, Attr::NONE);
        assert_eq!(buffer.to_plain_string(), "ab");
    }
}
