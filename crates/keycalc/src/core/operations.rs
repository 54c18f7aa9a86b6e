//! Binary operators and the calculate primitive
//!
//! Operands reach the engine as display strings, so this module also owns
//! the conversions between `f64` and the text shown on the display.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// The four binary operators on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad column order
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol as printed on the button
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns a name usable in element ids
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }

    /// Parses a button symbol
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" => Some(Self::Multiply),
            "÷" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to two numeric operands
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Combines two operands, either of which may be non-numeric (`None`).
///
/// A non-numeric operand makes the second operand pass through unchanged,
/// so malformed input never turns into a fault. Only division by zero is an
/// error.
pub fn calculate(first: Option<f64>, second: Option<f64>, op: Operator) -> CalcResult<Option<f64>> {
    let numeric = |v: Option<f64>| v.filter(|x| !x.is_nan());
    match (numeric(first), numeric(second)) {
        (Some(a), Some(b)) => op.apply(a, b).map(Some),
        _ => Ok(second),
    }
}

/// Parses display text as an operand.
///
/// Reads the longest numeric prefix, so a trailing partial exponent
/// (`1.5e+`) or other junk is ignored. Empty strings, a lone `.`, a lone sign
/// and text without a leading number are non-numeric.
#[must_use]
pub fn parse_operand(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let prefix = &text[..numeric_prefix_len(text)];
    if prefix.is_empty() {
        return None;
    }
    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => prefix.parse::<f64>().ok(),
    }
}

/// Byte length of the decimal literal at the start of `text`
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[pos..].starts_with("Infinity") {
        return pos + "Infinity".len();
    }

    let int_digits = digits_from(pos);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = digits_from(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(pos + 1 + sign);
        if exp_digits > 0 {
            pos += 1 + sign + exp_digits;
        }
    }
    pos
}

/// Formats a result for the display.
///
/// Matches the number-to-string conversion browsers use: plain decimal
/// digits in `[1e-6, 1e21)`, exponent form with an explicit sign outside it.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{value}");
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
