//! Differential renderer for fullscreen mode.
//!
//! Each scene is compared to the previous one and only changed cells are
//! written, wrapped in a synchronized-output block so the terminal paints
//! the whole update at once. A size change forces a full redraw.

use std::io::{self, Stdout, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

pub struct DiffRenderer<W: Write = Stdout> {
    writer: W,
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<Stdout> {
    /// Renderer writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for DiffRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        if previous.is_none() {
            ansi::clear_screen(&mut self.output)?;
        }
        self.cell_renderer.reset();

        let mut written = 0;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let changed = previous
                    .as_ref()
                    .and_then(|prev| prev.get(x, y))
                    .is_none_or(|prev_cell| prev_cell != cell);
                if changed {
                    written += 1;
                    self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
                }
            }
        }

        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(&mut self.writer)?;

        self.previous = Some(buffer.clone());
        Ok(written)
    }

    /// Drop the previous frame so the next render is a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen and hide the cursor.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.output.flush_to(&mut self.writer)?;
        self.invalidate();
        Ok(())
    }

    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_to(&mut self.writer)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    #[test]
    fn test_first_render_is_full() {
        let mut renderer = DiffRenderer::with_writer(Vec::new());
        let buffer = FrameBuffer::new(4, 2);
        assert_eq!(renderer.render(&buffer).unwrap(), 8);
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = DiffRenderer::with_writer(Vec::new());
        let mut buffer = FrameBuffer::new(4, 2);
        renderer.render(&buffer).unwrap();
        assert_eq!(renderer.render(&buffer).unwrap(), 0);

        buffer.set_cell(1, 1, 'x', Rgba::GREEN_500, None, Attr::NONE);
        assert_eq!(renderer.render(&buffer).unwrap(), 1);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = DiffRenderer::with_writer(Vec::new());
        renderer.render(&FrameBuffer::new(4, 2)).unwrap();
        assert_eq!(renderer.render(&FrameBuffer::new(3, 3)).unwrap(), 9);
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::with_writer(Vec::new());
        renderer.render(&FrameBuffer::new(2, 2)).unwrap();
        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&FrameBuffer::new(2, 2)).unwrap(), 4);
    }

    #[test]
    fn test_fullscreen_sequences() {
        let mut renderer = DiffRenderer::with_writer(Vec::new());
        renderer.enter_fullscreen().unwrap();
        renderer.exit_fullscreen().unwrap();
        let out = String::from_utf8_lossy(renderer.writer()).into_owned();
        assert!(out.starts_with("\x1b[?1049h"));
        assert!(out.ends_with("\x1b[?1049l"));
    }
}
