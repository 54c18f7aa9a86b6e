//! Keypad button layout shared by every front end
//!
//! Layout:
//! ```text
//! [ C ] [ ← ] [ ÷ ] [ × ]
//! [ 7 ] [ 8 ] [ 9 ] [ - ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [ = ]
//! [ 0 ] [ . ]
//! ```

use crate::core::{Operator, Token};

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The token this button produces
    pub token: Token,
    /// The element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(token: Token, row: usize, col: usize) -> Self {
        Self {
            token,
            id: element_id(token),
            row,
            col,
        }
    }

    /// The label printed on the button (also its `data-value`)
    #[must_use]
    pub fn label(&self) -> String {
        self.token.label()
    }
}

/// Stable element id for a token's button
#[must_use]
pub fn element_id(token: Token) -> String {
    match token {
        Token::Digit(d) => format!("btn-{d}"),
        Token::Decimal => "btn-decimal".to_string(),
        Token::Operator(op) => format!("btn-{}", op.name()),
        Token::Equals => "btn-equals".to_string(),
        Token::Clear => "btn-clear".to_string(),
        Token::Backspace => "btn-backspace".to_string(),
    }
}

/// Calculator keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let grid: [&[Token]; 5] = [
            &[
                Token::Clear,
                Token::Backspace,
                Token::Operator(Operator::Divide),
                Token::Operator(Operator::Multiply),
            ],
            &[
                Token::Digit(7),
                Token::Digit(8),
                Token::Digit(9),
                Token::Operator(Operator::Subtract),
            ],
            &[
                Token::Digit(4),
                Token::Digit(5),
                Token::Digit(6),
                Token::Operator(Operator::Add),
            ],
            &[
                Token::Digit(1),
                Token::Digit(2),
                Token::Digit(3),
                Token::Equals,
            ],
            &[Token::Digit(0), Token::Decimal],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, tokens)| {
                tokens
                    .iter()
                    .enumerate()
                    .map(move |(col, token)| KeypadButtonDef::new(*token, row, col))
            })
            .collect();

        Self {
            buttons,
            rows: grid.len(),
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button producing a token
    #[must_use]
    pub fn find_button_by_token(&self, token: Token) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.token == token)
    }

    /// Resolves a click on an element to a token
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Token> {
        self.find_button_by_id(element_id).map(|btn| btn.token)
    }
}
