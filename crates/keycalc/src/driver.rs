//! Unified calculator driver
//!
//! Scenarios are written once against [`CalculatorDriver`] and run on every
//! host: the bare engine, the mock-DOM page, and the terminal app.

use crate::core::{Calculator, DisplaySink};
use crate::keymap::map_key;
use crate::web::WebCalculator;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use keycalc::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use keycalc::web::WebCalculator;
///
/// let mut page = WebCalculator::new();
/// verify_basic_arithmetic(&mut page);
/// assert_eq!(page.display(), "0");
/// ```
pub trait CalculatorDriver {
    /// Presses the button with this label
    fn press(&mut self, label: &str);

    /// Presses a key by its browser key name
    fn key(&mut self, name: &str);

    /// Text currently on the display
    fn display(&self) -> String;

    /// Presses each label in order
    fn press_all(&mut self, labels: &[&str]) {
        for label in labels {
            self.press(label);
        }
    }

    /// Presses each key in order
    fn key_all(&mut self, names: &[&str]) {
        for name in names {
            self.key(name);
        }
    }

    /// Presses the clear button
    fn clear(&mut self) {
        self.press("C");
    }
}

impl<S: DisplaySink> CalculatorDriver for Calculator<S> {
    fn press(&mut self, label: &str) {
        self.handle_input(label);
    }

    fn key(&mut self, name: &str) {
        if let Some(mapping) = map_key(name) {
            self.handle_token(mapping.token);
        }
    }

    fn display(&self) -> String {
        self.engine().display().to_string()
    }
}

impl CalculatorDriver for WebCalculator {
    fn press(&mut self, label: &str) {
        self.click_label(label);
    }

    fn key(&mut self, name: &str) {
        self.press_key(name);
    }

    fn display(&self) -> String {
        Self::display(self).to_string()
    }
}

#[cfg(feature = "tui")]
impl CalculatorDriver for crate::tui::CalculatorApp {
    fn press(&mut self, label: &str) {
        self.press_label(label);
    }

    fn key(&mut self, name: &str) {
        if let Some(mapping) = map_key(name) {
            Self::press(self, mapping.token);
        }
    }

    fn display(&self) -> String {
        Self::display(self).to_string()
    }
}

// ===== Unified scenarios =====
// These run against ANY CalculatorDriver implementation and leave the
// display at "0".

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["5", "+", "3", "="]);
    assert_eq!(driver.display(), "8");
    driver.clear();

    driver.press_all(&["9", "-", "4", "="]);
    assert_eq!(driver.display(), "5");
    driver.clear();

    driver.press_all(&["6", "×", "7", "="]);
    assert_eq!(driver.display(), "42");
    driver.clear();

    driver.press_all(&["8", "÷", "2", "="]);
    assert_eq!(driver.display(), "4");
    driver.clear();
    assert_eq!(driver.display(), "0");
}

/// Verifies left-to-right chaining with intermediate results
pub fn verify_chaining<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["2", "+", "3", "×"]);
    assert_eq!(driver.display(), "5");
    driver.press_all(&["4", "="]);
    assert_eq!(driver.display(), "20");

    // A fresh number after "=" replaces the display
    driver.press("7");
    assert_eq!(driver.display(), "7");
    driver.clear();
}

/// Verifies decimal entry and floating point display
pub fn verify_decimal_entry<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    // The second operand replaces the display, so its text is shown exactly
    driver.press_all(&["2", "+", "1", ".", "2", ".", "5"]);
    assert_eq!(driver.display(), "1.25");
    driver.press("=");
    assert_eq!(driver.display(), "3.25");
    driver.clear();

    driver.press_all(&["0", ".", "1", "+", "0", ".", "2", "="]);
    assert_eq!(driver.display(), "0.30000000000000004");
    driver.clear();

    driver.press_all(&["1", "÷", "4", "="]);
    assert_eq!(driver.display(), "0.25");
    driver.clear();
}

/// Verifies backspace down to the initial display
pub fn verify_backspace<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["9", "+", "1", "2", "3", "←"]);
    assert_eq!(driver.display(), "12");
    driver.press_all(&["←", "←"]);
    assert_eq!(driver.display(), "0");
    driver.press("←");
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Verifies clear, including the "0" it leaves in the input
pub fn verify_clear<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["7", "+", "C"]);
    assert_eq!(driver.display(), "0");

    // Digits after clear append to the "0"
    driver.press("5");
    assert_eq!(driver.display(), "05");
    driver.press_all(&["+", "1", "="]);
    assert_eq!(driver.display(), "6");
    driver.clear();
}

/// Verifies the division-by-zero error and recovery
pub fn verify_division_by_zero<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["5", "÷", "0", "="]);
    assert_eq!(driver.display(), "Error");

    driver.press("7");
    assert_eq!(driver.display(), "7");
    driver.clear();

    driver.press_all(&["5", "÷", "0", "="]);
    driver.press("←");
    assert_eq!(driver.display(), "0");
    driver.clear();
}

/// Verifies the keyboard shortcuts
pub fn verify_keyboard<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.key_all(&["1", "2", "*", "3", "Enter"]);
    assert_eq!(driver.display(), "36");

    driver.key("Delete");
    assert_eq!(driver.display(), "0");

    driver.key_all(&["9", "/", "3", "="]);
    assert_eq!(driver.display(), "3");

    driver.key_all(&["F5", "Shift"]);
    assert_eq!(driver.display(), "3");

    driver.key("c");
    assert_eq!(driver.display(), "0");
}

/// Verifies that unknown labels leave the state alone
pub fn verify_unknown_labels<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    driver.press_all(&["6", "×", "4", "%", "sqrt", ""]);
    assert_eq!(driver.display(), "4");
    driver.press("=");
    assert_eq!(driver.display(), "24");
    driver.clear();
}

/// Runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver + ?Sized>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_decimal_entry(driver);
    verify_backspace(driver);
    verify_clear(driver);
    verify_division_by_zero(driver);
    verify_keyboard(driver);
    verify_unknown_labels(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordingSink;

    fn engine_driver() -> Calculator<RecordingSink> {
        Calculator::new(RecordingSink::new())
    }

    // ===== Engine host =====

    #[test]
    fn test_engine_driver_full_suite() {
        run_all_scenarios(&mut engine_driver());
    }

    #[test]
    fn test_engine_driver_records_frames() {
        let mut driver = engine_driver();
        driver.press_all(&["1", "+"]);
        assert_eq!(driver.sink().frames(), ["0", "1", "1"]);
    }

    #[test]
    fn test_engine_driver_ignores_unmapped_keys() {
        let mut driver = engine_driver();
        driver.key("Tab");
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.sink().frames().len(), 1);
    }

    // ===== Web host =====

    #[test]
    fn test_web_driver_full_suite() {
        run_all_scenarios(&mut WebCalculator::new());
    }

    #[test]
    fn test_web_driver_uses_dom() {
        let mut page = WebCalculator::new();
        page.press_all(&["3", "×"]);
        page.key("/");
        assert_eq!(page.dom().event_history().len(), 3);
        assert_eq!(page.dom().prevented_keys(), ["/"]);
    }

    // ===== Terminal host =====

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crate::tui::CalculatorApp;

        #[test]
        fn test_tui_driver_full_suite() {
            run_all_scenarios(&mut CalculatorApp::new());
        }

        #[test]
        fn test_tui_driver_highlights_keys() {
            let mut app = CalculatorApp::new();
            CalculatorDriver::key(&mut app, "Enter");
            assert_eq!(app.highlighted(), Some(crate::core::Token::Equals));
        }
    }

    // ===== Individual scenarios =====

    #[test]
    fn test_scenarios_individually() {
        let mut driver = engine_driver();
        verify_basic_arithmetic(&mut driver);
        verify_chaining(&mut driver);
        verify_decimal_entry(&mut driver);
        verify_backspace(&mut driver);
        verify_clear(&mut driver);
        verify_division_by_zero(&mut driver);
        verify_keyboard(&mut driver);
        verify_unknown_labels(&mut driver);
        assert_eq!(driver.display(), "0");
    }

    #[test]
    fn test_default_clear() {
        let mut driver = engine_driver();
        driver.press("9");
        driver.clear();
        assert_eq!(driver.display(), "0");
    }
}
