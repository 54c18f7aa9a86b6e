//! Keycalc - keypad calculator engine
//!
//! A four-function calculator driven by discrete tokens: digits, the decimal
//! point, `+ - × ÷`, `=`, clear and backspace. Operations chain strictly left
//! to right with no precedence, and the engine pushes every display change to
//! a [`DisplaySink`](core::DisplaySink).
//!
//! Front ends:
//!
//! - [`web`]: mock DOM host for headless tests, plus real browser bindings
//!   behind the `wasm` feature
//! - `tui`: ratatui terminal host behind the `tui` feature
//! - the `keycalc` binary for batch use
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new(RecordingSink::new());
//! for label in ["1", "2", "+", "3", "×", "2", "="] {
//!     calc.handle_input(label);
//! }
//!
//! // (12 + 3) × 2, evaluated left to right
//! assert_eq!(calc.engine().display(), "30");
//! assert_eq!(calc.sink().last(), Some("30"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keymap;
pub mod keypad;

#[cfg(feature = "tui")]
pub mod tui;

/// Web module - always available for testing
/// (Mock DOM allows testing without actual browser bindings)
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, ColorChoice, Verbosity};
    pub use crate::core::{
        calculate, format_number, CalcError, CalcResult, Calculator, CalculatorEngine,
        DisplaySink, Operator, Phase, RecordingSink, StateSnapshot, Token,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::keymap::{map_key, KeyMapping};
    pub use crate::keypad::Keypad;
    pub use crate::web::{DomEvent, MockDom, WebCalculator};

    #[cfg(feature = "tui")]
    pub use crate::tui::CalculatorApp;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut calc = Calculator::new(String::new());
        calc.handle_input("7");
        assert_eq!(calc.sink(), "7");
    }

    #[test]
    fn test_left_to_right_chaining() {
        let mut engine = CalculatorEngine::new();
        for label in ["2", "+", "3", "×", "4", "="] {
            engine.handle_label(label);
        }
        assert_eq!(engine.display(), "20");
    }

    #[test]
    fn test_operator_arithmetic() {
        assert_eq!(Operator::Add.apply(10.0, 5.0).unwrap(), 15.0);
        assert_eq!(Operator::Subtract.apply(10.0, 3.0).unwrap(), 7.0);
        assert_eq!(Operator::Multiply.apply(6.0, 7.0).unwrap(), 42.0);
        assert_eq!(Operator::Divide.apply(20.0, 4.0).unwrap(), 5.0);
        assert_eq!(
            Operator::Divide.apply(1.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_keyboard_and_buttons_agree() {
        let mut by_key = CalculatorEngine::new();
        let mut by_button = CalculatorEngine::new();
        for (key, label) in [("9", "9"), ("*", "×"), ("4", "4"), ("Enter", "=")] {
            by_key.handle(map_key(key).unwrap().token);
            by_button.handle_label(label);
        }
        assert_eq!(by_key.display(), "36");
        assert_eq!(by_key.snapshot(), by_button.snapshot());
    }

    #[test]
    fn test_division_by_zero_display() {
        let mut page = WebCalculator::new();
        for label in ["8", "÷", "0", "="] {
            page.click_label(label);
        }
        assert_eq!(page.display(), "Error");
        page.click_label("C");
        assert_eq!(page.display(), "0");
    }
}
