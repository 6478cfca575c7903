//! State Module - consumer-side runtime state
//!
//! - **Store** - reactive signals the views render from
//! - **Animate** - player that paces frames and honours cancellation
//! - **Input** - crossterm key events to commands

pub mod animate;
pub mod input;
mod store;

pub use animate::{Pause, PlayOutcome, Player, RecordedPause, ThreadPause};
pub use input::{Command, InputEvent};
pub use store::SortStore;
