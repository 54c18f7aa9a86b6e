//! Keypad widget for the terminal calculator
//!
//! Draws the shared keypad layout as a grid of bracketed labels and maps
//! mouse clicks back to tokens.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::Token;
use crate::keypad::Keypad;

/// Inner area of a bordered keypad block
fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Width and height of one button cell, or `None` when the area is too small
fn cell_size(keypad: &Keypad, inner: Rect) -> Option<(u16, u16)> {
    let (rows, cols) = keypad.dimensions();
    let btn_width = inner.width / u16::try_from(cols).ok()?;
    let btn_height = inner.height / u16::try_from(rows).ok()?;
    (btn_width > 0 && btn_height > 0).then_some((btn_width, btn_height))
}

/// Converts a click position to the token of the button under it
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<Token> {
    let inner = inner_area(area);
    if x < inner.x || y < inner.y || x >= inner.x + inner.width || y >= inner.y + inner.height {
        return None;
    }

    let (btn_width, btn_height) = cell_size(keypad, inner)?;
    let col = usize::from((x - inner.x) / btn_width);
    let row = usize::from((y - inner.y) / btn_height);
    keypad.get_button_at(row, col).map(|b| b.token)
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    highlighted: Option<Token>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            highlighted: None,
        }
    }

    /// Highlights the button producing `token`
    #[must_use]
    pub fn highlight(mut self, token: Option<Token>) -> Self {
        self.highlighted = token;
        self
    }

    fn style_for(&self, token: Token) -> Style {
        if self.highlighted == Some(token) {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match token {
            Token::Digit(_) | Token::Decimal => Style::default().fg(Color::White),
            Token::Operator(_) => Style::default().fg(Color::Yellow),
            Token::Equals => Style::default().fg(Color::Green),
            Token::Clear => Style::default().fg(Color::Red),
            Token::Backspace => Style::default().fg(Color::Cyan),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = inner_area(area);
        let Some((btn_width, btn_height)) = cell_size(self.keypad, inner) else {
            return;
        };
        if btn_width < 3 {
            return;
        }

        for btn in self.keypad.buttons() {
            let (Ok(row), Ok(col)) = (u16::try_from(btn.row), u16::try_from(btn.col)) else {
                continue;
            };
            let x = inner.x + col * btn_width;
            let y = inner.y + row * btn_height + btn_height / 2;

            let label = format!("[{}]", btn.label());
            let label_width = u16::try_from(label.chars().count()).unwrap_or(btn_width);
            let label_x = x + btn_width.saturating_sub(label_width) / 2;

            if y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(
                    label_x,
                    y,
                    &Span::styled(label, self.style_for(btn.token)),
                    btn_width,
                );
            }
        }
    }
}
