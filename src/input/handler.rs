use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    TogglePause,
    /// Speed preset 1 (slowest) to 4 (fastest)
    Speed(u8),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Up),
            KeyCode::Down => KeyAction::GameAction(Action::Down),
            KeyCode::Left => KeyAction::GameAction(Action::Left),
            KeyCode::Right => KeyAction::GameAction(Action::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::GameAction(Action::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::GameAction(Action::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::GameAction(Action::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::GameAction(Action::Right),

            // Playback
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char(c @ '1'..='4') => KeyAction::Speed(c as u8 - b'0'),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
