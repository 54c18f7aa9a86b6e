//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::format_number;
use crate::keymap::KEY_HELP;

/// Title of the outer frame
pub const TITLE: &str = " keycalc ";

/// Quit shortcuts, shown below the key map help
pub const QUIT_HELP: (&str, &str) = ("Esc q", "Quit");

/// Screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Display box
    pub display: Rect,
    /// Pending operation summary
    pub status: Rect,
    /// Keypad grid
    pub keypad: Rect,
    /// Key help sidebar
    pub help: Rect,
}

impl ScreenLayout {
    /// Splits the full terminal area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Length(26), // Display and status
                Constraint::Length(22), // Keypad
                Constraint::Min(24),    // Help sidebar
            ])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(columns[0]);

        let keypad_height = columns[1].height.min(12);
        Self {
            display: left[0],
            status: left[1],
            keypad: Rect {
                height: keypad_height,
                ..columns[1]
            },
            help: columns[2],
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &mut CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    app.set_keypad_area(ScreenLayout::new(area).keypad);
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let text = self.app.display();
        let style = if self.app.engine().phase().is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let pending = match (engine.previous_value(), engine.operator()) {
            (Some(value), Some(op)) => format!("{} {op}", format_number(value)),
            (Some(value), None) => format_number(value),
            (None, _) => "none".to_string(),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Pending ", Style::default().fg(Color::Gray)),
                Span::styled(pending, Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("Phase   ", Style::default().fg(Color::Gray)),
                Span::raw(engine.phase().name()),
            ]),
        ];

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = KEY_HELP
            .iter()
            .chain(std::iter::once(&QUIT_HELP))
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>9}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let layout = ScreenLayout::new(area);
        self.render_display(layout.display, buf);
        self.render_status(layout.status, buf);
        KeypadWidget::new(self.app.keypad())
            .highlight(self.app.highlighted())
            .render(layout.keypad, buf);
        Self::render_help(layout.help, buf);
    }
}
