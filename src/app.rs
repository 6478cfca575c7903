//! App - wires the store, engine, views and terminal together.
//!
//! ```text
//! key ──► Command ──► SortStore ──► derived scene ──► render effect ──► terminal
//!                        ▲
//!   SortEngine ──► SortRun ──► Player ─┘  (InputPause keeps polling keys)
//! ```
//!
//! Everything runs on one thread. While a sort plays, the player's pause
//! keeps reading input so Quit cancels the run and resizes still repaint.
//!
//! `--plain` skips the terminal entirely and prints each composed frame as
//! text, which is handy for piping and for eyeballing traces.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::terminal;
use rand::Rng;
use spark_signals::{Signal, derived, effect, signal};
use tracing::{debug, info, warn};

use crate::config::{Config, MAX_SIZE, MIN_SIZE, generate_array};
use crate::engine::{CancelToken, SortEngine};
use crate::error::Result;
use crate::renderer::DiffRenderer;
use crate::state::{Command, InputEvent, Pause, Player, SortStore, ThreadPause, input};
use crate::view::{SceneSnapshot, compose};

/// Input poll interval, ~60fps.
const TICK: Duration = Duration::from_millis(16);

/// Canvas used by `--plain`.
const PLAIN_WIDTH: u16 = 80;
const PLAIN_HEIGHT: u16 = 16;

// =============================================================================
// Command handling
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Start,
    Quit,
}

/// Apply a non-sorting command to the store.
///
/// `Start` and `Quit` are only reported back; the store ignores every other
/// command while a sort is running.
pub fn apply_command<R: Rng + ?Sized>(store: &SortStore, command: Command, rng: &mut R) -> Flow {
    match command {
        Command::Start => return Flow::Start,
        Command::Quit => return Flow::Quit,
        Command::Reset => {
            store.reset_array(rng);
        }
        Command::NextAlgorithm => {
            store.set_algorithm(store.algorithm.get().next());
        }
        Command::ToggleView => {
            store.set_view(store.view.get().toggle());
        }
        Command::Grow | Command::Shrink => {
            let size = store.size.get();
            // Each step moves toward the allowed range and never away from it
            let target = match command {
                Command::Grow if size < MAX_SIZE => Some((size + 1).max(MIN_SIZE)),
                Command::Shrink if size > MIN_SIZE => Some((size - 1).min(MAX_SIZE)),
                _ => None,
            };
            if let Some(target) = target {
                if let Err(err) = store.set_size(target, rng) {
                    debug!(%err, "size change rejected");
                }
            }
        }
    }
    Flow::Continue
}

// =============================================================================
// Input-aware pause
// =============================================================================

/// Waits out a frame hold while still serving the terminal.
///
/// Quit cancels the run; resizes go straight to the size signal. Other
/// commands are dropped since the store would ignore them mid-sort anyway.
pub struct InputPause {
    size: Signal<(u16, u16)>,
    quit: bool,
}

impl InputPause {
    pub fn new(size: Signal<(u16, u16)>) -> Self {
        Self { size, quit: false }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Pause for InputPause {
    fn pause(&mut self, hold: Duration, cancel: &CancelToken) {
        let deadline = Instant::now() + hold;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match input::poll_event(remaining.min(TICK)) {
                Ok(Some(InputEvent::Command(Command::Quit))) => {
                    self.quit = true;
                    cancel.cancel();
                }
                Ok(Some(InputEvent::Resize(w, h))) => {
                    self.size.set((w, h));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "input poll failed during sort; cancelling run");
                    self.quit = true;
                    cancel.cancel();
                }
            }
            if remaining.is_zero() {
                return;
            }
        }
    }
}

// =============================================================================
// Terminal session
// =============================================================================

/// Raw mode plus alternate screen for as long as it lives.
struct TerminalSession {
    renderer: Rc<RefCell<DiffRenderer>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut renderer = DiffRenderer::new();
        if let Err(err) = renderer.enter_fullscreen() {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self {
            renderer: Rc::new(RefCell::new(renderer)),
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Best effort: we may be unwinding
        if let Err(err) = self.renderer.borrow_mut().exit_fullscreen() {
            warn!(%err, "failed to leave fullscreen");
        }
        let _ = terminal::disable_raw_mode();
    }
}

// =============================================================================
// App
// =============================================================================

pub struct App<R> {
    config: Config,
    store: SortStore,
    engine: SortEngine,
    rng: R,
    running: Arc<AtomicBool>,
}

impl<R: Rng> App<R> {
    /// Build the initial state: explicit values if given, otherwise a random array.
    pub fn new(config: Config, mut rng: R) -> Self {
        let array = match &config.values {
            Some(values) => values.clone(),
            None => generate_array(config.size, &mut rng),
        };
        let store = SortStore::new(array, config.algorithm, config.view);
        Self {
            config,
            store,
            engine: SortEngine::new(),
            rng,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn store(&self) -> &SortStore {
        &self.store
    }

    /// Stop the event loop after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn prepare_engine(&mut self) {
        let pacing = self.config.pacing_for(self.store.algorithm.get());
        self.engine.set_pacing(pacing);
    }

    // -------------------------------------------------------------------------
    // Fullscreen
    // -------------------------------------------------------------------------

    /// Run the interactive UI until the user quits.
    pub fn run(mut self) -> Result<()> {
        let session = TerminalSession::enter()?;
        let size = signal(terminal::size()?);

        let scene_store = self.store.clone();
        let scene_size = size.clone();
        let screen = derived(move || {
            let (width, height) = scene_size.get();
            compose(&scene_store.snapshot(), width, height)
        });

        let renderer = session.renderer.clone();
        let stop_render = effect(move || {
            let buffer = screen.get();
            if let Err(err) = renderer.borrow_mut().render(&buffer) {
                warn!(%err, "render failed");
            }
        });

        info!(algorithm = %self.store.algorithm.get(), size = self.store.size.get(), "visualizer started");
        let result = self.event_loop(&size);

        stop_render();
        drop(session);
        result
    }

    fn event_loop(&mut self, size: &Signal<(u16, u16)>) -> Result<()> {
        while self.running.load(Ordering::SeqCst) {
            let Some(event) = input::poll_event(TICK)? else {
                continue;
            };
            match event {
                InputEvent::Command(command) => match apply_command(&self.store, command, &mut self.rng) {
                    Flow::Continue => {}
                    Flow::Quit => self.stop(),
                    Flow::Start => {
                        if self.sort_interactive(size) {
                            self.stop();
                        }
                    }
                },
                InputEvent::Resize(w, h) => {
                    size.set((w, h));
                }
                InputEvent::None => {}
            }
        }
        Ok(())
    }

    /// Play one sort on screen. Returns true if the user asked to quit.
    fn sort_interactive(&mut self, size: &Signal<(u16, u16)>) -> bool {
        if !self.store.begin_sort() {
            return false;
        }
        self.prepare_engine();
        let algorithm = self.store.algorithm.get();
        let Some(mut run) = self.engine.run_with_cancel(self.store.array.get(), algorithm, CancelToken::new()) else {
            self.store.abort_sort();
            return false;
        };

        let store = self.store.clone();
        let mut player = Player::new(InputPause::new(size.clone()));
        let outcome = player.play(&mut run, |frame| store.apply(frame));
        if outcome.cancelled {
            store.abort_sort();
        }
        debug!(frames = outcome.frames, cancelled = outcome.cancelled, "sort finished");
        player.into_pause().quit_requested()
    }

    // -------------------------------------------------------------------------
    // Plain
    // -------------------------------------------------------------------------

    /// Sort once and print every frame as text to `out`.
    pub fn run_plain<W: Write>(mut self, out: &mut W) -> Result<()> {
        if !self.store.begin_sort() {
            return Ok(());
        }
        self.prepare_engine();
        let algorithm = self.store.algorithm.get();
        let Some(mut run) = self.engine.run(self.store.array.get(), algorithm) else {
            return Ok(());
        };

        write_scene(out, &self.store.snapshot())?;

        let store = self.store.clone();
        let mut write_result: io::Result<()> = Ok(());
        let mut player = Player::new(ThreadPause::default());
        let outcome = player.play(&mut run, |frame| {
            store.apply(frame);
            if write_result.is_ok() {
                write_result = write_scene(out, &store.snapshot());
            }
        });
        write_result?;
        info!(frames = outcome.frames, "plain run complete");
        Ok(())
    }
}

fn write_scene<W: Write>(out: &mut W, scene: &SceneSnapshot) -> io::Result<()> {
    let buffer = compose(scene, PLAIN_WIDTH, PLAIN_HEIGHT);
    writeln!(out, "{}\n", buffer.to_plain_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Algorithm;
    use crate::view::ViewMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config() -> Config {
        Config {
            values: Some(vec![5, 3, 8, 1]),
            size: 4,
            instant: true,
            ..Config::default()
        }
    }

    fn app() -> App<StdRng> {
        App::new(config(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_new_uses_explicit_values() {
        let app = app();
        assert_eq!(app.store().array.get(), vec![5, 3, 8, 1]);
        assert_eq!(app.store().view.get(), ViewMode::Circle);
    }

    #[test]
    fn test_new_generates_when_no_values() {
        let config = Config {
            size: 12,
            ..Config::default()
        };
        let app = App::new(config, StdRng::seed_from_u64(3));
        assert_eq!(app.store().array.get().len(), 12);
    }

    #[test]
    fn test_apply_command_controls() {
        let store = SortStore::new(vec![1; 10], Algorithm::Bubble, ViewMode::Circle);
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(apply_command(&store, Command::NextAlgorithm, &mut rng), Flow::Continue);
        assert_eq!(store.algorithm.get(), Algorithm::Selection);

        apply_command(&store, Command::ToggleView, &mut rng);
        assert_eq!(store.view.get(), ViewMode::Bar);

        apply_command(&store, Command::Grow, &mut rng);
        assert_eq!(store.array.get().len(), 11);
        apply_command(&store, Command::Shrink, &mut rng);
        apply_command(&store, Command::Shrink, &mut rng);
        assert_eq!(store.size.get(), 9);

        assert_eq!(apply_command(&store, Command::Start, &mut rng), Flow::Start);
        assert_eq!(apply_command(&store, Command::Quit, &mut rng), Flow::Quit);
    }

    #[test]
    fn test_size_clamped_at_bounds() {
        let store = SortStore::new(vec![1; MAX_SIZE], Algorithm::Bubble, ViewMode::Bar);
        let mut rng = StdRng::seed_from_u64(2);
        apply_command(&store, Command::Grow, &mut rng);
        assert_eq!(store.array.get().len(), MAX_SIZE);
    }

    #[test]
    fn test_shrink_never_grows_short_array() {
        let store = SortStore::new(vec![7, 8, 9], Algorithm::Bubble, ViewMode::Bar);
        let mut rng = StdRng::seed_from_u64(4);
        apply_command(&store, Command::Shrink, &mut rng);
        assert_eq!(store.array.get(), vec![7, 8, 9]);
        assert_eq!(store.size.get(), 3);

        apply_command(&store, Command::Grow, &mut rng);
        assert_eq!(store.array.get().len(), MIN_SIZE);
    }

    #[test]
    fn test_grow_from_empty_reaches_minimum() {
        let store = SortStore::new(Vec::new(), Algorithm::Bubble, ViewMode::Bar);
        let mut rng = StdRng::seed_from_u64(6);
        apply_command(&store, Command::Grow, &mut rng);
        assert_eq!(store.size.get(), MIN_SIZE);
        assert_eq!(store.array.get().len(), MIN_SIZE);
    }

    #[test]
    fn test_oversized_array_shrinks_to_maximum() {
        let store = SortStore::new(vec![1; MAX_SIZE + 5], Algorithm::Bubble, ViewMode::Bar);
        let mut rng = StdRng::seed_from_u64(8);
        apply_command(&store, Command::Shrink, &mut rng);
        assert_eq!(store.array.get().len(), MAX_SIZE);
    }

    #[test]
    fn test_controls_ignored_while_sorting() {
        let store = SortStore::new(vec![4, 2], Algorithm::Bubble, ViewMode::Bar);
        let mut rng = StdRng::seed_from_u64(5);
        store.begin_sort();
        apply_command(&store, Command::NextAlgorithm, &mut rng);
        apply_command(&store, Command::Reset, &mut rng);
        assert_eq!(store.algorithm.get(), Algorithm::Bubble);
        assert_eq!(store.array.get(), vec![4, 2]);
    }

    #[test]
    fn test_run_plain_prints_every_frame() {
        let mut out = Vec::new();
        app().run_plain(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Currently Visualizing: Bubble sort"));
        assert!(text.contains("( 5 ) ( 3 ) ( 8 ) ( 1 )"));
        assert!(text.trim_end().ends_with("( 1 ) ( 3 ) ( 5 ) ( 8 )"));
        assert!(text.contains("size 4 | view circle | sorted"));
    }

    #[test]
    fn test_run_plain_honours_algorithm() {
        let config = Config {
            algorithm: Algorithm::Merge,
            ..config()
        };
        let mut out = Vec::new();
        App::new(config, StdRng::seed_from_u64(1)).run_plain(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Currently Visualizing: Merge sort"));
        assert!(text.trim_end().ends_with("( 1 ) ( 3 ) ( 5 ) ( 8 )"));
    }
}
