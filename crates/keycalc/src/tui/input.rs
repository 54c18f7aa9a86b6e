//! Keyboard input handling
//!
//! Terminal keys are translated to browser-style key names and then run
//! through the shared key map, so both hosts accept the same shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Token;
use crate::keymap::map_key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed a token to the engine
    Token(Token),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            _ => Self::key_name(code)
                .as_deref()
                .and_then(map_key)
                .map_or(KeyAction::None, |m| KeyAction::Token(m.token)),
        }
    }

    /// `KeyboardEvent.key` equivalent of a terminal key code
    #[must_use]
    pub fn key_name(code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::Enter => Some("Enter".to_string()),
            KeyCode::Backspace => Some("Backspace".to_string()),
            KeyCode::Delete => Some("Delete".to_string()),
            _ => None,
        }
    }
}
