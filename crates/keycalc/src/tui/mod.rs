//! Terminal front end for the calculator
//!
//! Key presses and mouse clicks on the keypad feed the same engine as the
//! browser host. [`run`] drives the event loop on any ratatui backend; the
//! binary sets up the real terminal around it.

mod app;
mod input;
mod keypad;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::debug;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{hit_test, KeypadWidget};
pub use ui::{render, CalculatorUI, ScreenLayout, QUIT_HELP, TITLE};

/// Runs the event loop until the user quits
///
/// # Errors
///
/// Returns an error if drawing or reading terminal events fails.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| render(app, f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            other => debug!(?other, "ignored terminal event"),
        }
    }
    Ok(())
}
