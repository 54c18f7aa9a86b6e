//! Browser bindings
//!
//! Wires the engine to a real page: a click listener on every
//! `.calculator button` (reading its `data-value`), a document-level
//! `keydown` listener, and `<input id="display">` as the display sink.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, HtmlInputElement, KeyboardEvent};

use super::dom::{CALCULATOR_CLASS, DATA_VALUE, DISPLAY_ID};
use crate::core::{Calculator, DisplaySink};
use crate::keymap::map_key;

/// Display sink backed by an `<input>` element
#[derive(Debug)]
struct InputDisplay {
    element: HtmlInputElement,
}

impl DisplaySink for InputDisplay {
    fn render(&mut self, text: &str) {
        self.element.set_value(text);
    }
}

type SharedCalculator = Rc<RefCell<Calculator<InputDisplay>>>;

/// Browser calculator, the WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    document: Document,
    calculator: SharedCalculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Binds to the page's display element and initializes it to "0"
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let element = document
            .get_element_by_id(DISPLAY_ID)
            .ok_or_else(|| JsValue::from_str("missing #display element"))?
            .dyn_into::<HtmlInputElement>()?;

        Ok(Self {
            document,
            calculator: Rc::new(RefCell::new(Calculator::new(InputDisplay { element }))),
        })
    }

    /// Registers click and keydown listeners
    pub fn attach(&self) -> Result<(), JsValue> {
        let buttons = self
            .document
            .query_selector_all(&format!(".{CALCULATOR_CLASS} button"))?;

        for i in 0..buttons.length() {
            let Some(node) = buttons.item(i) else {
                continue;
            };
            let calculator = Rc::clone(&self.calculator);
            let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let label = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|e| e.get_attribute(DATA_VALUE));
                if let Some(label) = label {
                    calculator.borrow_mut().handle_input(&label);
                }
            });
            node.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        let calculator = Rc::clone(&self.calculator);
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(mapping) = map_key(&event.key()) {
                if mapping.prevent_default {
                    event.prevent_default();
                }
                calculator.borrow_mut().handle_token(mapping.token);
            }
        });
        self.document
            .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();

        Ok(())
    }

    /// Feeds a token label directly
    pub fn handle_input(&self, label: &str) {
        self.calculator.borrow_mut().handle_input(label);
    }

    /// Current display text
    pub fn display(&self) -> String {
        self.calculator.borrow().engine().display().to_string()
    }
}

/// Initializes the calculator once the module loads
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let calculator = BrowserCalculator::new()?;
    calculator.attach()?;
    console::log_1(&"Calculator WASM initialized".into());
    Ok(())
}
