use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameController, GameEvent, Signal};
use crate::input::InputHandler;
use crate::render::Renderer;
use crate::storage::KeyValueStore;

/// Keyboard-driven play in the terminal
///
/// Terminal events and timer ticks are only turned into [`GameEvent`]s
/// here; the controller handles them one at a time.
pub struct HumanMode<S: KeyValueStore> {
    controller: GameController<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
}

impl<S: KeyValueStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        let renderer = Renderer::new(config.cell_size);
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let controller = GameController::new(config, store)?;

        Ok(Self {
            controller,
            renderer,
            input_handler: InputHandler::new(),
            tick_interval,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            grid_size = self.controller.config().grid_size,
            tick_ms = self.tick_interval.as_millis() as u64,
            high_score = self.controller.scoreboard().high_score,
            "session started"
        );

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even if the loop failed
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.controller.scoreboard().games_played,
            "session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The timer is only polled while a game is running
        let mut ticking = false;

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => break,
                    }
                }

                _ = tick_timer.tick(), if ticking => {
                    self.controller.enqueue(GameEvent::Tick);
                }

                _ = tokio::signal::ctrl_c() => {
                    self.controller.enqueue(GameEvent::Quit);
                }
            }

            for signal in self.controller.dispatch()? {
                match signal {
                    Signal::Started => {
                        // First move lands one full interval after the key press
                        tick_timer.reset();
                        ticking = true;
                    }
                    Signal::Stopped => ticking = false,
                    Signal::Quit => {
                        debug!("quit requested");
                        return Ok(());
                    }
                }
            }

            if self.controller.state().is_running() {
                self.controller.scoreboard_mut().update();
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        // Resizes need no handling beyond the redraw after dispatch
        if let Event::Key(key) = event {
            if let Some(game_event) = self.input_handler.handle_key_event(key).into_event() {
                self.controller.enqueue(game_event);
            }
        }
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, self.controller.state(), self.controller.scoreboard());
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase};
    use crate::storage::{MemoryStore, save_high_score};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_mode_initialization() {
        let config = GameConfig {
            tick_interval_ms: 80,
            ..Default::default()
        };
        let mode = HumanMode::new(config, MemoryStore::new()).unwrap();

        assert_eq!(mode.tick_interval, Duration::from_millis(80));
        assert_eq!(mode.controller.state().phase, Phase::Ready);
        assert_eq!(mode.controller.state().score, 0);
    }

    #[test]
    fn test_stored_high_score_shown_from_start() {
        let mut store = MemoryStore::new();
        save_high_score(&mut store, 9).unwrap();

        let mode = HumanMode::new(GameConfig::default(), store).unwrap();
        assert_eq!(mode.controller.scoreboard().high_score, 9);
    }

    #[test]
    fn test_key_events_reach_the_queue() {
        let mut mode = HumanMode::new(GameConfig::default(), MemoryStore::new()).unwrap();

        mode.handle_event(key(KeyCode::Char('d')));
        mode.handle_event(key(KeyCode::Char('x')));
        mode.handle_event(Event::Resize(100, 50));
        assert_eq!(mode.controller.pending(), 1);

        let signals = mode.controller.dispatch().unwrap();
        assert_eq!(signals, vec![Signal::Started]);
        assert_eq!(mode.controller.state().snake.direction, Some(Direction::Right));
    }

    #[test]
    fn test_restart_key_resets_game() {
        let mut mode = HumanMode::new(GameConfig::default(), MemoryStore::new()).unwrap();

        mode.handle_event(key(KeyCode::Up));
        mode.controller.enqueue(GameEvent::Tick);
        mode.handle_event(key(KeyCode::Char('r')));

        let signals = mode.controller.dispatch().unwrap();
        assert_eq!(signals, vec![Signal::Started, Signal::Stopped]);
        assert_eq!(mode.controller.state().phase, Phase::Ready);
        assert_eq!(mode.controller.state().ticks, 0);
    }
}
