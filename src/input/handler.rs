use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    Quit,
    None,
}

impl KeyAction {
    /// Event for the dispatch queue, if the key means anything to the game
    pub fn into_event(self) -> Option<GameEvent> {
        match self {
            KeyAction::Turn(direction) => Some(GameEvent::Turn(direction)),
            KeyAction::Restart => Some(GameEvent::Restart),
            KeyAction::Quit => Some(GameEvent::Quit),
            KeyAction::None => None,
        }
    }
}

/// Maps keys to game actions.
///
/// Reversal checks are left to the game state, which knows the heading.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Releases and repeats from terminals that report them are ignored
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),
            KeyCode::Char(c) => Self::map_char(c),
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn map_char(c: char) -> KeyAction {
        match c.to_ascii_lowercase() {
            'w' => KeyAction::Turn(Direction::Up),
            's' => KeyAction::Turn(Direction::Down),
            'a' => KeyAction::Turn(Direction::Left),
            'd' => KeyAction::Turn(Direction::Right),
            'r' => KeyAction::Restart,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
