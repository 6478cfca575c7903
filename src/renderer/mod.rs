//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It takes a composed [`FrameBuffer`]
//! and writes optimized ANSI sequences: fullscreen on the alternate screen
//! through [`DiffRenderer`], or flattened to text with
//! [`FrameBuffer::to_plain_string`].

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
