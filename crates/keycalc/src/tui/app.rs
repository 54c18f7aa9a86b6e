//! TUI application state

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::input::{InputHandler, KeyAction};
use super::keypad::hit_test;
use crate::core::{Calculator, CalculatorEngine, Token};
use crate::keypad::Keypad;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// Engine rendering into an owned display buffer
    calculator: Calculator<String>,
    keypad: Keypad,
    input_handler: InputHandler,
    /// Button to highlight after the last press
    highlighted: Option<Token>,
    /// Where the keypad was last drawn, for mouse hit testing
    keypad_area: Option<Rect>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app showing "0"
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(String::new()),
            keypad: Keypad::new(),
            input_handler: InputHandler::new(),
            highlighted: None,
            keypad_area: None,
            should_quit: false,
        }
    }

    /// Text currently on the display
    #[must_use]
    pub fn display(&self) -> &str {
        self.calculator.sink()
    }

    /// The engine behind the display
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        self.calculator.engine()
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Button pressed most recently
    #[must_use]
    pub fn highlighted(&self) -> Option<Token> {
        self.highlighted
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Records where the keypad widget was drawn
    pub fn set_keypad_area(&mut self, area: Rect) {
        self.keypad_area = Some(area);
    }

    /// Feeds a token and highlights its button
    pub fn press(&mut self, token: Token) {
        self.highlighted = Some(token);
        self.calculator.handle_token(token);
    }

    /// Feeds a button label; unknown labels are ignored
    pub fn press_label(&mut self, label: &str) {
        match Token::from_label(label) {
            Some(token) => self.press(token),
            None => self.calculator.handle_input(label),
        }
    }

    /// Applies a key action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Token(token) => self.press(token),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a terminal key event
    pub fn handle_key(&mut self, event: KeyEvent) {
        let action = self.input_handler.handle_key(event);
        self.apply(action);
    }

    /// Handles a mouse event; left clicks on the keypad press buttons
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let token = self
            .keypad_area
            .and_then(|area| hit_test(&self.keypad, area, event.column, event.row));
        if let Some(token) = token {
            self.press(token);
        }
    }
}
