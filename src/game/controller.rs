//! Single-threaded dispatch loop over game events
//!
//! The front-end only enqueues [`GameEvent`]s; the controller drains them
//! in arrival order and is the one place that mutates the game state. The
//! returned [`Signal`]s tell the driver when to start or stop its timer.

use anyhow::Result;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::{
    action::{Direction, GameEvent},
    config::GameConfig,
    engine::{GameEngine, StepResult},
    state::{GameState, Phase},
};
use crate::metrics::Scoreboard;
use crate::storage::{self, KeyValueStore};

/// What the driver has to do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The game just started; begin ticking
    Started,
    /// The game ended or was reset; stop ticking
    Stopped,
    Quit,
}

pub struct GameController<S: KeyValueStore> {
    engine: GameEngine,
    state: GameState,
    scoreboard: Scoreboard,
    store: S,
    queue: VecDeque<GameEvent>,
}

impl<S: KeyValueStore> GameController<S> {
    /// Build a controller, reading the persisted high score once
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        let high_score = storage::load_high_score(&store)?;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            scoreboard: Scoreboard::new(high_score),
            store,
            queue: VecDeque::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn enqueue(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Handle every queued event in order, one at a time
    pub fn dispatch(&mut self) -> Result<Vec<Signal>> {
        let mut signals = Vec::new();

        while let Some(event) = self.queue.pop_front() {
            if let Some(signal) = self.handle(event)? {
                signals.push(signal);
            }
        }

        Ok(signals)
    }

    fn handle(&mut self, event: GameEvent) -> Result<Option<Signal>> {
        match event {
            GameEvent::Tick => Ok(self.tick()),
            GameEvent::Turn(direction) => Ok(self.turn(direction)),
            GameEvent::Restart => {
                self.restart();
                Ok(Some(Signal::Stopped))
            }
            GameEvent::Quit => Ok(Some(Signal::Quit)),
        }
    }

    fn turn(&mut self, direction: Direction) -> Option<Signal> {
        if !self.state.steer(direction) {
            debug!(?direction, "turn rejected");
            return None;
        }

        if self.state.phase == Phase::Ready {
            self.state.phase = Phase::Running;
            self.scoreboard.on_game_start();
            info!(?direction, "game started");
            return Some(Signal::Started);
        }

        None
    }

    fn tick(&mut self) -> Option<Signal> {
        if !self.state.is_running() {
            return None;
        }

        let result: StepResult = self.engine.advance(&mut self.state);

        if result.ate_food && self.scoreboard.record_score(self.state.score) {
            info!(high_score = self.state.score, "new high score");
            // Not fatal: the session keeps its in-memory high score
            if let Err(err) = storage::save_high_score(&mut self.store, self.state.score) {
                warn!(%err, "failed to persist high score");
            }
        }

        if let Phase::GameOver(reason) = self.state.phase {
            self.scoreboard.on_game_over();
            info!(
                ?reason,
                score = self.state.score,
                ticks = self.state.ticks,
                "game over"
            );
            return Some(Signal::Stopped);
        }

        None
    }

    fn restart(&mut self) {
        if self.state.is_running() {
            self.scoreboard.on_game_over();
            info!(
                score = self.state.score,
                ticks = self.state.ticks,
                "game abandoned"
            );
        }

        self.state = self.engine.reset();
        debug!("board reset");
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
