//! Mock DOM for headless testing
//!
//! Models just enough of a page to host the calculator: elements by id, a
//! display `<input>` whose value is rewritten on every render, and a record
//! of dispatched events and suppressed key defaults.

use std::collections::HashMap;

use crate::core::{DisplaySink, INITIAL_DISPLAY};
use crate::keypad::Keypad;

/// Element id of the display input
pub const DISPLAY_ID: &str = "display";
/// Class carried by the calculator container
pub const CALCULATOR_CLASS: &str = "calculator";
/// Attribute holding a button's token label
pub const DATA_VALUE: &str = "data-value";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute value
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }
}

/// DOM events the calculator listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key pressed anywhere in the document
    KeyDown {
        /// `KeyboardEvent.key` value
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key-down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM hosting the calculator page
#[derive(Debug, Default)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    prevented_keys: Vec<String>,
    renders: usize,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            ..Self::default()
        }
    }

    /// Creates the calculator page: display input plus one button per key
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();

        let display = DomElement::new("input")
            .with_id(DISPLAY_ID)
            .with_attr("type", "text")
            .with_attr("readonly", "")
            .with_attr("value", INITIAL_DISPLAY);

        let mut container = DomElement::new("div")
            .with_id("calculator")
            .with_class(CALCULATOR_CLASS)
            .with_child(display.clone());
        dom.register_element(display);

        for btn in keypad.buttons() {
            let label = btn.label();
            let elem = DomElement::new("button")
                .with_id(&btn.id)
                .with_text(&label)
                .with_attr(DATA_VALUE, &label)
                .with_class(&format!("keypad-row-{}", btn.row))
                .with_class(&format!("keypad-col-{}", btn.col));
            container = container.with_child(elem.clone());
            dom.register_element(elem);
        }

        dom.root = container;
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Ids of all buttons inside the calculator container
    #[must_use]
    pub fn button_ids(&self) -> Vec<&str> {
        self.root
            .children
            .iter()
            .filter(|c| c.tag == "button")
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Current value of the display input
    #[must_use]
    pub fn display_value(&self) -> Option<&str> {
        self.get_element(DISPLAY_ID)
            .and_then(|e| e.get_attr("value"))
    }

    /// Number of times the display was written
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Records a dispatched event
    pub fn record_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Marks a key event as having its default action suppressed
    pub fn prevent_default(&mut self, key: &str) {
        self.prevented_keys.push(key.to_string());
    }

    /// Keys whose default action was suppressed, in order
    #[must_use]
    pub fn prevented_keys(&self) -> &[String] {
        &self.prevented_keys
    }

    /// Clears event and suppression history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
        self.prevented_keys.clear();
    }
}

impl DisplaySink for MockDom {
    fn render(&mut self, text: &str) {
        self.renders += 1;
        if let Some(display) = self.elements.get_mut(DISPLAY_ID) {
            display.set_attr("value", text);
        }
    }
}
