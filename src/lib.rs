//! Grid Snake - a Snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the event dispatch loop (game module)
//! - Keyboard mapping (input module)
//! - Canvas rendering with ratatui (render module)
//! - High score persistence (storage module)
//! - Session statistics (metrics module)
//! - The interactive terminal driver (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
