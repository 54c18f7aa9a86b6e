//! Core calculator module
//!
//! Everything with decision-making lives here: the operator arithmetic,
//! the token vocabulary, and the engine that interprets tokens.

pub mod engine;
mod operations;
pub mod token;

pub use engine::{
    Calculator, CalculatorEngine, DisplaySink, Phase, RecordingSink, StateSnapshot, INITIAL_DISPLAY,
};
pub use operations::{calculate, format_number, parse_operand, Operator};
pub use token::Token;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// A label or key name outside the token vocabulary
    #[error("Unknown token: {0}")]
    UnknownToken(String),
}

impl CalcError {
    /// Text shown on the display when this error ends a calculation
    #[must_use]
    pub const fn display_text(&self) -> &'static str {
        match self {
            Self::DivisionByZero | Self::UnknownToken(_) => "Error",
        }
    }
}
