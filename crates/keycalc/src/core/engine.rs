//! Calculator engine: token interpretation and evaluation
//!
//! The engine keeps the text being typed plus a [`Phase`] describing what
//! has been captured so far. The classic calculator fields (pending operator,
//! accumulator, waiting flag) are derived from the phase, so an operator can
//! never be pending without an accumulator.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{calculate, format_number, parse_operand, CalcError, Operator, Token};

/// Text shown before any input
pub const INITIAL_DISPLAY: &str = "0";

/// Where the engine is in a two-operand calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Nothing typed since startup or clear
    Empty,
    /// Typing the first operand
    EnteringFirst,
    /// An operator or `=` arrived without a usable operand
    AwaitingFirst,
    /// Operator chosen, next digit starts the second operand
    OperatorPending {
        /// Value of the first operand
        accumulator: f64,
        /// Operator to apply
        operator: Operator,
    },
    /// Typing the second operand
    EnteringSecond {
        /// Value of the first operand
        accumulator: f64,
        /// Operator to apply
        operator: Operator,
    },
    /// `=` pressed, the result is shown and the next digit starts fresh
    ResultDisplayed {
        /// Value of the result
        accumulator: f64,
    },
    /// A digit typed after `=`; the accumulator stays the first operand
    EnteringAfterResult {
        /// Value of the previous result
        accumulator: f64,
    },
    /// Division by zero; the display shows `Error`
    Error,
}

impl Phase {
    /// The accumulated value, if one was captured
    #[must_use]
    pub const fn accumulator(&self) -> Option<f64> {
        match self {
            Self::OperatorPending { accumulator, .. }
            | Self::EnteringSecond { accumulator, .. }
            | Self::ResultDisplayed { accumulator }
            | Self::EnteringAfterResult { accumulator } => Some(*accumulator),
            Self::Empty | Self::EnteringFirst | Self::AwaitingFirst | Self::Error => None,
        }
    }

    /// The pending operator, if any
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        match self {
            Self::OperatorPending { operator, .. } | Self::EnteringSecond { operator, .. } => {
                Some(*operator)
            }
            _ => None,
        }
    }

    /// True when the next digit replaces the input instead of extending it
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        matches!(
            self,
            Self::AwaitingFirst | Self::OperatorPending { .. } | Self::ResultDisplayed { .. }
        )
    }

    /// True after a division by zero
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Short name for logs and snapshots
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::EnteringFirst => "entering_first",
            Self::AwaitingFirst => "awaiting_first",
            Self::OperatorPending { .. } => "operator_pending",
            Self::EnteringSecond { .. } => "entering_second",
            Self::ResultDisplayed { .. } => "result_displayed",
            Self::EnteringAfterResult { .. } => "entering_after_result",
            Self::Error => "error",
        }
    }

    /// Phase after a digit or decimal point was accepted
    const fn after_entry(self) -> Self {
        match self {
            Self::Empty | Self::EnteringFirst | Self::AwaitingFirst | Self::Error => {
                Self::EnteringFirst
            }
            Self::OperatorPending {
                accumulator,
                operator,
            }
            | Self::EnteringSecond {
                accumulator,
                operator,
            } => Self::EnteringSecond {
                accumulator,
                operator,
            },
            Self::ResultDisplayed { accumulator } | Self::EnteringAfterResult { accumulator } => {
                Self::EnteringAfterResult { accumulator }
            }
        }
    }

    /// Phase after an operator (`Some`) or `=` (`None`) was processed
    const fn after_operation(accumulator: Option<f64>, next: Option<Operator>) -> Self {
        match (accumulator, next) {
            (Some(accumulator), Some(operator)) => Self::OperatorPending {
                accumulator,
                operator,
            },
            (Some(accumulator), None) => Self::ResultDisplayed { accumulator },
            (None, _) => Self::AwaitingFirst,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Empty
    }
}

/// Serializable view of the engine state
///
/// Equality treats a NaN accumulator as equal to itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Text on the display
    pub display: String,
    /// Number being typed
    pub current_input: String,
    /// Pending operator symbol
    pub operator: Option<Operator>,
    /// Accumulated value
    pub previous_value: Option<f64>,
    /// Whether the next digit starts a fresh number
    pub waiting_for_second_operand: bool,
    /// Phase name
    pub phase: String,
}

impl PartialEq for StateSnapshot {
    fn eq(&self, other: &Self) -> bool {
        let same_value = match (self.previous_value, other.previous_value) {
            (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
            (a, b) => a.is_none() && b.is_none(),
        };
        same_value
            && self.display == other.display
            && self.current_input == other.current_input
            && self.operator == other.operator
            && self.waiting_for_second_operand == other.waiting_for_second_operand
            && self.phase == other.phase
    }
}

/// The calculator state machine
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    input: String,
    phase: Phase,
}

impl CalculatorEngine {
    /// Creates an engine in the startup state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number currently being typed (or the last result)
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.input
    }

    /// The current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The pending operator
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        self.phase.operator()
    }

    /// The accumulated value
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.phase.accumulator()
    }

    /// Whether the next digit replaces the input
    #[must_use]
    pub fn is_waiting_for_second_operand(&self) -> bool {
        self.phase.is_waiting()
    }

    /// Text the display should show
    #[must_use]
    pub fn display(&self) -> &str {
        match self.phase {
            Phase::Error => CalcError::DivisionByZero.display_text(),
            Phase::Empty if self.input.is_empty() => INITIAL_DISPLAY,
            _ => &self.input,
        }
    }

    /// Captures the state for inspection or serialization
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            display: self.display().to_string(),
            current_input: self.input.clone(),
            operator: self.operator(),
            previous_value: self.previous_value(),
            waiting_for_second_operand: self.is_waiting_for_second_operand(),
            phase: self.phase.name().to_string(),
        }
    }

    /// Processes one token.
    ///
    /// Returns true when the display must be re-rendered. A rejected second
    /// decimal point returns false.
    pub fn handle(&mut self, token: Token) -> bool {
        let changed = match token {
            Token::Digit(_) | Token::Decimal => self.enter(token),
            Token::Clear => {
                self.clear();
                true
            }
            Token::Backspace => {
                self.backspace();
                true
            }
            Token::Operator(op) => self.operate(Some(op)),
            Token::Equals => self.operate(None),
        };

        debug!(
            token = %token,
            phase = self.phase.name(),
            display = self.display(),
            "handled token"
        );
        changed
    }

    /// Parses and processes a button label; unknown labels are ignored
    pub fn handle_label(&mut self, label: &str) -> bool {
        match Token::from_label(label) {
            Some(token) => self.handle(token),
            None => {
                trace!(label, "ignored unknown token");
                false
            }
        }
    }

    fn enter(&mut self, token: Token) -> bool {
        let Some(ch) = token.to_char() else {
            return false;
        };

        if self.phase.is_waiting() {
            self.input.clear();
        } else if ch == '.' && self.input.contains('.') {
            trace!("rejected second decimal point");
            return false;
        }

        self.input.push(ch);
        self.phase = self.phase.after_entry();
        true
    }

    fn clear(&mut self) {
        self.input.clear();
        self.input.push_str(INITIAL_DISPLAY);
        self.phase = Phase::Empty;
    }

    fn backspace(&mut self) {
        self.input.pop();
        if self.input.is_empty() {
            self.input.push_str(INITIAL_DISPLAY);
        }
        if self.phase == Phase::Error {
            self.phase = Phase::Empty;
        }
    }

    /// Handles an operator (`Some`) or `=` (`None`)
    fn operate(&mut self, next: Option<Operator>) -> bool {
        let input_value = parse_operand(&self.input);

        let accumulator = match (self.phase.accumulator(), self.phase.operator()) {
            (None, _) if input_value.is_some() => input_value,
            (Some(accumulator), Some(pending)) => {
                match calculate(Some(accumulator), input_value, pending) {
                    Ok(Some(result)) => {
                        self.input = format_number(result);
                        Some(result)
                    }
                    Ok(None) => {
                        // A non-numeric operand passes through and becomes the accumulator
                        self.input = format_number(f64::NAN);
                        Some(f64::NAN)
                    }
                    Err(err) => {
                        warn!(error = %err, accumulator, operator = %pending, "calculation failed");
                        self.input.clear();
                        self.phase = Phase::Error;
                        return true;
                    }
                }
            }
            (accumulator, _) => accumulator,
        };

        self.phase = Phase::after_operation(accumulator, next);
        true
    }
}

/// Receives display updates from the engine
pub trait DisplaySink {
    /// Shows `text` verbatim
    fn render(&mut self, text: &str);
}

impl DisplaySink for String {
    fn render(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Sink that keeps every rendered frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    frames: Vec<String>,
}

impl RecordingSink {
    /// Creates an empty recording sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames in render order
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The most recent frame
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, text: &str) {
        self.frames.push(text.to_string());
    }
}

/// Engine plus the display it renders to
#[derive(Debug)]
pub struct Calculator<S> {
    engine: CalculatorEngine,
    sink: S,
}

impl<S: DisplaySink> Calculator<S> {
    /// Creates a calculator and initializes the display to `"0"`
    pub fn new(mut sink: S) -> Self {
        sink.render(INITIAL_DISPLAY);
        Self {
            engine: CalculatorEngine::new(),
            sink,
        }
    }

    /// Entry point for raw labels from buttons or mapped keys
    pub fn handle_input(&mut self, label: &str) {
        match Token::from_label(label) {
            Some(token) => self.handle_token(token),
            None => trace!(label, "ignored unknown token"),
        }
    }

    /// Processes a token and refreshes the display when needed
    pub fn handle_token(&mut self, token: Token) {
        if self.engine.handle(token) {
            self.sink.render(self.engine.display());
        }
    }

    /// The underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// The display sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the display sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Splits into engine and sink
    pub fn into_parts(self) -> (CalculatorEngine, S) {
        (self.engine, self.sink)
    }
}
