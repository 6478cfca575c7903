//! Input Module - crossterm events to visualizer commands
//!
//! The visualizer has a tiny, fixed key map, so instead of a handler registry
//! key events are translated straight into [`Command`]s.
//!
//! | Key                | Command          |
//! |--------------------|------------------|
//! | `s`, Enter, Space  | Start            |
//! | `r`                | Reset array      |
//! | `a`                | Next algorithm   |
//! | `v`                | Toggle view      |
//! | `+`, `=`, Right    | Grow array       |
//! | `-`, Left          | Shrink array     |
//! | `q`, Esc, Ctrl+C   | Quit             |

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};

// =============================================================================
// COMMANDS
// =============================================================================

/// A user request, independent of which key produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    NextAlgorithm,
    ToggleView,
    Grow,
    Shrink,
    Quit,
}

/// Unified event type for the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    /// Anything we don't care about
    None,
}

// =============================================================================
// KEY CONVERSION
// =============================================================================

/// Map a key event to a command. Releases and unmapped keys yield `None`.
pub fn command_for_key(event: KeyEvent) -> Option<Command> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('a') => Some(Command::NextAlgorithm),
        KeyCode::Char('v') => Some(Command::ToggleView),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Some(Command::Grow),
        KeyCode::Char('-') | KeyCode::Left => Some(Command::Shrink),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Convert a raw crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => command_for_key(key)
            .map(InputEvent::Command)
            .unwrap_or(InputEvent::None),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?)))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letter_commands() {
        assert_eq!(command_for_key(key(KeyCode::Char('s'))), Some(Command::Start));
        assert_eq!(command_for_key(key(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(command_for_key(key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(command_for_key(key(KeyCode::Char('a'))), Some(Command::NextAlgorithm));
        assert_eq!(command_for_key(key(KeyCode::Char('v'))), Some(Command::ToggleView));
        assert_eq!(command_for_key(key(KeyCode::Char('+'))), Some(Command::Grow));
        assert_eq!(command_for_key(key(KeyCode::Left)), Some(Command::Shrink));
        assert_eq!(command_for_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(event), Some(Command::Quit));
        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(event), None);
    }

    #[test]
    fn test_release_ignored() {
        let event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for_key(event), None);
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(convert_event(CrosstermEvent::Resize(100, 40)), InputEvent::Resize(100, 40));
        assert_eq!(convert_event(CrosstermEvent::FocusGained), InputEvent::None);
    }
}
