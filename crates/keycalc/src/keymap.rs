//! Physical key to token mapping
//!
//! Key names follow the browser `KeyboardEvent.key` convention (`"Enter"`,
//! `"Backspace"`, `"/"`). Hosts with a different key model translate into
//! these names first.

use crate::core::{Operator, Token};

/// Result of mapping a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMapping {
    /// Token to feed the engine
    pub token: Token,
    /// Whether the host must suppress the key's default action
    pub prevent_default: bool,
}

impl KeyMapping {
    const fn pass(token: Token) -> Self {
        Self {
            token,
            prevent_default: false,
        }
    }

    const fn suppress(token: Token) -> Self {
        Self {
            token,
            prevent_default: true,
        }
    }
}

/// Maps a key name to a token, or `None` for keys the calculator ignores
#[must_use]
pub fn map_key(key: &str) -> Option<KeyMapping> {
    if let Some(token) = Token::from_label(key).filter(Token::is_entry) {
        return Some(KeyMapping::pass(token));
    }

    match key {
        "+" => Some(KeyMapping::pass(Token::Operator(Operator::Add))),
        "-" => Some(KeyMapping::pass(Token::Operator(Operator::Subtract))),
        "*" | "x" | "X" => Some(KeyMapping::pass(Token::Operator(Operator::Multiply))),
        // "/" would open quick find in some browsers
        "/" => Some(KeyMapping::suppress(Token::Operator(Operator::Divide))),
        "Enter" | "=" => Some(KeyMapping::suppress(Token::Equals)),
        "Backspace" => Some(KeyMapping::pass(Token::Backspace)),
        _ if key.eq_ignore_ascii_case("c") || key.eq_ignore_ascii_case("delete") => {
            Some(KeyMapping::pass(Token::Clear))
        }
        _ => None,
    }
}

/// Key names a user can type for each token, for help screens
pub const KEY_HELP: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+ -", "Add, subtract"),
    ("* x", "Multiply"),
    ("/", "Divide"),
    ("Enter =", "Equals"),
    ("Backspace", "Delete last"),
    ("c Delete", "Clear"),
];
