//! Input token vocabulary
//!
//! Every front end normalizes its events into these tokens before they
//! reach the engine. The labels are the ones printed on the keypad.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, Operator};

/// A single normalized input unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// A digit (0-9)
    Digit(u8),
    /// The decimal point
    Decimal,
    /// A binary operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset all state
    Clear,
    /// Remove the last typed character
    Backspace,
}

/// Label of the clear button
pub const CLEAR_LABEL: &str = "C";
/// Label of the backspace button
pub const BACKSPACE_LABEL: &str = "←";

impl Token {
    /// Parses a button label; anything outside the vocabulary is `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(d) = c.to_digit(10) {
                return Some(Self::Digit(d as u8));
            }
        }

        match label {
            "." => Some(Self::Decimal),
            "=" => Some(Self::Equals),
            CLEAR_LABEL => Some(Self::Clear),
            BACKSPACE_LABEL => Some(Self::Backspace),
            other => Operator::from_symbol(other).map(Self::Operator),
        }
    }

    /// Returns the button label for this token
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => CLEAR_LABEL.to_string(),
            Self::Backspace => BACKSPACE_LABEL.to_string(),
        }
    }

    /// Returns the character a digit or decimal token appends to the input
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(_) | Self::Equals | Self::Clear | Self::Backspace => None,
        }
    }

    /// Returns true for tokens that edit the number being typed
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Decimal)
    }
}

impl FromStr for Token {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CalcError::UnknownToken(s.to_string()))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
