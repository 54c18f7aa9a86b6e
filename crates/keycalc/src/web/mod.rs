//! Web front end
//!
//! `MockDom` and `WebCalculator` run anywhere and back the headless tests;
//! `browser` holds the real `wasm-bindgen` wiring.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
mod dom;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use calculator::{DispatchOutcome, WebCalculator};
pub use dom::{DomElement, DomEvent, MockDom, CALCULATOR_CLASS, DATA_VALUE, DISPLAY_ID};
