//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller is the only mutator of game state; front-ends feed it events.

pub mod action;
pub mod config;
pub mod controller;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, GameEvent};
pub use config::GameConfig;
pub use controller::{GameController, Signal};
pub use engine::{GameEngine, StepResult};
pub use state::{CollisionType, EndReason, GameState, Phase, Position, Snake};
