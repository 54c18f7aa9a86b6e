//! Property-based tests for the calculator engine

#![allow(clippy::unwrap_used, clippy::expect_used)]

use keycalc::core::{CalculatorEngine, Operator, Token, INITIAL_DISPLAY};
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any operator
fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

/// Generate any token
fn token_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![
        4 => (0u8..=9u8).prop_map(Token::Digit),
        1 => Just(Token::Decimal),
        2 => operator_strategy().prop_map(Token::Operator),
        1 => Just(Token::Equals),
        1 => Just(Token::Clear),
        1 => Just(Token::Backspace),
    ]
}

fn run(tokens: &[Token]) -> CalculatorEngine {
    let mut engine = CalculatorEngine::new();
    for token in tokens {
        engine.handle(*token);
    }
    engine
}

proptest! {
    /// Clear resets everything from any state
    #[test]
    fn prop_clear_resets(tokens in prop::collection::vec(token_strategy(), 0..40)) {
        let mut engine = run(&tokens);
        engine.handle(Token::Clear);
        prop_assert_eq!(engine.current_input(), INITIAL_DISPLAY);
        prop_assert_eq!(engine.display(), INITIAL_DISPLAY);
        prop_assert!(engine.operator().is_none());
        prop_assert!(engine.previous_value().is_none());
        prop_assert!(!engine.is_waiting_for_second_operand());

        let once = engine.snapshot();
        engine.handle(Token::Clear);
        prop_assert_eq!(engine.snapshot(), once);
    }

    /// The input never holds two decimal points
    #[test]
    fn prop_single_decimal_point(tokens in prop::collection::vec(token_strategy(), 0..60)) {
        let mut engine = CalculatorEngine::new();
        for token in tokens {
            engine.handle(token);
            prop_assert!(engine.current_input().matches('.').count() <= 1);
        }
    }

    /// A pending operator always has an accumulator
    #[test]
    fn prop_operator_implies_accumulator(tokens in prop::collection::vec(token_strategy(), 0..60)) {
        let mut engine = CalculatorEngine::new();
        for token in tokens {
            engine.handle(token);
            if engine.operator().is_some() {
                prop_assert!(engine.previous_value().is_some());
            }
        }
    }

    /// Backspace never leaves an empty input or display
    #[test]
    fn prop_backspace_floor(
        tokens in prop::collection::vec(token_strategy(), 0..30),
        presses in 1usize..12,
    ) {
        let mut engine = run(&tokens);
        for _ in 0..presses {
            engine.handle(Token::Backspace);
            prop_assert!(!engine.current_input().is_empty());
            prop_assert!(!engine.display().is_empty());
        }
    }

    /// The display is "Error", number text or a prefix of it, or blank after an error
    #[test]
    fn prop_display_is_well_formed(tokens in prop::collection::vec(token_strategy(), 0..60)) {
        let engine = run(&tokens);
        let display = engine.display();
        // Backspace can trim a result down to any prefix of its text
        let numeric_text = display
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e'));
        let special_prefix = ["NaN", "Infinity", "-Infinity"]
            .iter()
            .any(|special| special.starts_with(display));
        prop_assert!(
            display == "Error" || display.is_empty() || numeric_text || special_prefix,
            "unexpected display {:?}",
            display
        );
    }

    /// Arbitrary labels never panic and unknown ones change nothing
    #[test]
    fn prop_arbitrary_labels_are_total(labels in prop::collection::vec(".{0,3}", 0..30)) {
        let mut engine = CalculatorEngine::new();
        for label in &labels {
            let before = engine.snapshot();
            let known = Token::from_label(label).is_some();
            engine.handle_label(label);
            if !known {
                prop_assert_eq!(engine.snapshot(), before);
            }
        }
    }

    /// Digits typed after an operator form the second operand
    #[test]
    fn prop_operator_then_digits(a in 1u32..1000, b in 1u32..1000, op in operator_strategy()) {
        let mut engine = CalculatorEngine::new();
        for label in a.to_string().chars().map(String::from) {
            engine.handle_label(&label);
        }
        engine.handle(Token::Operator(op));
        for label in b.to_string().chars().map(String::from) {
            engine.handle_label(&label);
        }
        prop_assert_eq!(engine.display(), b.to_string());
        engine.handle(Token::Equals);

        let expected = op.apply(f64::from(a), f64::from(b)).unwrap();
        prop_assert_eq!(engine.display().parse::<f64>().unwrap(), expected);
    }

    /// Division by zero always ends in the error display
    #[test]
    fn prop_division_by_zero(a in 0u32..10_000) {
        let mut engine = CalculatorEngine::new();
        for label in a.to_string().chars().map(String::from) {
            engine.handle_label(&label);
        }
        for label in ["÷", "0", "="] {
            engine.handle_label(label);
        }
        prop_assert_eq!(engine.display(), "Error");
        prop_assert!(engine.previous_value().is_none());
        prop_assert!(engine.operator().is_none());
    }
}
