//! Calculator hosted in the mock DOM
//!
//! Mirrors the browser wiring: button clicks read the button's
//! `data-value`, key-downs go through the key map, and the engine renders
//! straight into the display element.

use tracing::debug;

use super::dom::{DomEvent, MockDom, DATA_VALUE};
use crate::core::{Calculator, CalculatorEngine, Token};
use crate::keymap::map_key;
use crate::keypad::Keypad;

/// What happened to a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// The event produced a token
    pub handled: bool,
    /// The event's default action was suppressed
    pub default_prevented: bool,
}

/// Web calculator: engine plus the page it renders into
#[derive(Debug)]
pub struct WebCalculator {
    calculator: Calculator<MockDom>,
    keypad: Keypad,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebCalculator {
    /// Builds the page and initializes the display
    #[must_use]
    pub fn new() -> Self {
        let keypad = Keypad::new();
        let dom = MockDom::calculator(&keypad);
        Self {
            calculator: Calculator::new(dom),
            keypad,
        }
    }

    /// The page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.calculator.sink()
    }

    /// Mutable access to the page
    pub fn dom_mut(&mut self) -> &mut MockDom {
        self.calculator.sink_mut()
    }

    /// The engine behind the page
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        self.calculator.engine()
    }

    /// The keypad layout used to build the page
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.dom().display_value().unwrap_or_default()
    }

    /// Dispatches an event to the page listeners
    pub fn dispatch(&mut self, event: DomEvent) -> DispatchOutcome {
        self.dom_mut().record_event(event.clone());

        match event {
            DomEvent::Click { element_id } => {
                let label = self
                    .dom()
                    .get_element(&element_id)
                    .and_then(|e| e.get_attr(DATA_VALUE))
                    .map(str::to_string);

                match label {
                    Some(label) => {
                        self.calculator.handle_input(&label);
                        DispatchOutcome {
                            handled: true,
                            default_prevented: false,
                        }
                    }
                    None => {
                        debug!(element_id = %element_id, "click outside keypad");
                        DispatchOutcome::default()
                    }
                }
            }
            DomEvent::KeyDown { key } => match map_key(&key) {
                Some(mapping) => {
                    if mapping.prevent_default {
                        self.dom_mut().prevent_default(&key);
                    }
                    self.calculator.handle_token(mapping.token);
                    DispatchOutcome {
                        handled: true,
                        default_prevented: mapping.prevent_default,
                    }
                }
                None => DispatchOutcome::default(),
            },
        }
    }

    /// Clicks the button with the given label
    pub fn click_label(&mut self, label: &str) -> DispatchOutcome {
        let id = Token::from_label(label)
            .and_then(|t| self.keypad.find_button_by_token(t))
            .map(|b| b.id.clone());

        match id {
            Some(id) => self.dispatch(DomEvent::click(&id)),
            None => DispatchOutcome::default(),
        }
    }

    /// Presses a key by its `KeyboardEvent.key` name
    pub fn press_key(&mut self, key: &str) -> DispatchOutcome {
        self.dispatch(DomEvent::key_down(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_all(calc: &mut WebCalculator, labels: &[&str]) {
        for label in labels {
            calc.click_label(label);
        }
    }

    #[test]
    fn test_initial_display() {
        let calc = WebCalculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.dom().render_count(), 1);
    }

    #[test]
    fn test_click_sequence() {
        let mut calc = WebCalculator::new();
        click_all(&mut calc, &["5", "+", "3", "="]);
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.dom().event_history().len(), 4);
    }

    #[test]
    fn test_click_reads_data_value() {
        let mut calc = WebCalculator::new();
        let outcome = calc.dispatch(DomEvent::click("btn-9"));
        assert!(outcome.handled);
        assert_eq!(calc.display(), "9");
    }

    #[test]
    fn test_click_unknown_element() {
        let mut calc = WebCalculator::new();
        let outcome = calc.dispatch(DomEvent::click("display"));
        assert!(!outcome.handled);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_keyboard_sequence() {
        let mut calc = WebCalculator::new();
        for key in ["8", "/", "0", "Enter"] {
            calc.press_key(key);
        }
        assert_eq!(calc.display(), "Error");
        calc.press_key("Delete");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_keyboard_prevents_default_for_mapped_shortcuts() {
        let mut calc = WebCalculator::new();
        assert!(calc.press_key("/").default_prevented);
        assert!(calc.press_key("Enter").default_prevented);
        assert!(!calc.press_key("7").default_prevented);
        assert_eq!(calc.dom().prevented_keys(), ["/", "Enter"]);
    }

    #[test]
    fn test_unmapped_key_leaves_default() {
        let mut calc = WebCalculator::new();
        let outcome = calc.press_key("F5");
        assert!(!outcome.handled);
        assert!(!outcome.default_prevented);
        assert!(calc.dom().prevented_keys().is_empty());
    }

    #[test]
    fn test_keyboard_multiply_alias() {
        let mut calc = WebCalculator::new();
        for key in ["6", "x", "7", "="] {
            calc.press_key(key);
        }
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_backspace_button_and_key() {
        let mut calc = WebCalculator::new();
        click_all(&mut calc, &["1", "2", "3", "←"]);
        assert_eq!(calc.display(), "12");
        calc.press_key("Backspace");
        calc.press_key("Backspace");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_engine_access() {
        let mut calc = WebCalculator::new();
        click_all(&mut calc, &["4", "×"]);
        assert_eq!(calc.engine().previous_value(), Some(4.0));
        assert_eq!(calc.keypad().button_count(), 18);
    }
}
