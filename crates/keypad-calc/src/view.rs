//! Mock DOM view model
//!
//! Visual feedback through observable DOM state: the primary display, the
//! optional operation region and the keypad, without a browser.

use std::collections::HashMap;

use crate::core::KeypadCalculator;
use crate::keypad::Keypad;

/// Element id of the primary display
pub const DISPLAY_ID: &str = "display-value";
/// Element id of the secondary annotation region
pub const OPERATION_ID: &str = "operation-display";
/// Element id of the display container
pub const SCREEN_ID: &str = "calc-screen";

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

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Pointer activation of an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key pressed while the page has focus
    KeyDown {
        /// The key name, as `KeyboardEvent.key` reports it
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

    /// Creates a key down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM holding the calculator page
#[derive(Debug)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Child ids of the screen container, in document order
    screen_children: Vec<String>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::calculator()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            screen_children: Vec::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator page: a screen with the primary display,
    /// and the keypad
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let screen = DomElement::new("div").with_id(SCREEN_ID).with_class("screen");
        let display = DomElement::new("div")
            .with_id(DISPLAY_ID)
            .with_class("display-value")
            .with_text("0");
        dom.register_element(screen);
        dom.register_element(display);
        dom.screen_children.push(DISPLAY_ID.to_string());

        let keypad = Keypad::new();
        for button in keypad.create_dom_elements() {
            dom.register_element(button);
        }
        dom.register_element(keypad.create_keypad_element());

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

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Inserts a screen element before an existing one
    pub fn insert_before(&mut self, element: DomElement, before_id: &str) {
        let id = element.id.clone();
        let index = self
            .screen_children
            .iter()
            .position(|c| c == before_id)
            .unwrap_or(self.screen_children.len());
        self.screen_children.insert(index, id);
        self.register_element(element);
    }

    /// Removes an element; returns whether it existed
    pub fn remove_element(&mut self, id: &str) -> bool {
        self.screen_children.retain(|c| c != id);
        self.elements.remove(id).is_some()
    }

    /// Ids of the screen's children in document order
    #[must_use]
    pub fn screen_order(&self) -> &[String] {
        &self.screen_children
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Synchronizes the page with calculator state.
    ///
    /// The operation region is created before the display the first time an
    /// annotation appears and removed when the annotation goes away.
    pub fn render(&mut self, calc: &KeypadCalculator) {
        self.set_element_text(DISPLAY_ID, calc.screen_text());

        match calc.annotation() {
            Some(text) => {
                if self.get_element(OPERATION_ID).is_none() {
                    let region = DomElement::new("div")
                        .with_id(OPERATION_ID)
                        .with_class("operation-display");
                    self.insert_before(region, DISPLAY_ID);
                }
                self.set_element_text(OPERATION_ID, text);
            }
            None => {
                self.remove_element(OPERATION_ID);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_builder() {
        let elem = DomElement::new("button")
            .with_id("btn")
            .with_text("Click")
            .with_class("primary")
            .with_attr("type", "submit");

        assert_eq!(elem.id, "btn");
        assert_eq!(elem.text_content, "Click");
        assert!(elem.has_class("primary"));
        assert!(!elem.has_class("secondary"));
        assert_eq!(elem.get_attr("type"), Some("submit"));
        assert_eq!(elem.get_attr("missing"), None);
    }

    #[test]
    fn test_dom_element_default() {
        let elem = DomElement::default();
        assert_eq!(elem.tag, "div");
        assert!(elem.children.is_empty());
    }

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-1"),
            DomEvent::Click {
                element_id: "btn-1".into()
            }
        );
        assert_eq!(
            DomEvent::key_down("Enter"),
            DomEvent::KeyDown {
                key: "Enter".into()
            }
        );
    }

    // ===== MockDom structure =====

    #[test]
    fn test_calculator_page() {
        let dom = MockDom::calculator();
        assert_eq!(dom.get_element_text(DISPLAY_ID), Some("0"));
        assert!(dom.get_element(OPERATION_ID).is_none());
        assert!(dom.get_element("btn-equals").is_some());
        assert!(dom.get_element("calc-keypad").is_some());
        assert_eq!(dom.screen_order(), [DISPLAY_ID.to_string()]);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut dom = MockDom::calculator();
        dom.insert_before(DomElement::new("div").with_id("banner"), DISPLAY_ID);
        assert_eq!(dom.screen_order(), ["banner".to_string(), DISPLAY_ID.to_string()]);
        assert!(dom.remove_element("banner"));
        assert!(!dom.remove_element("banner"));
        assert_eq!(dom.screen_order(), [DISPLAY_ID.to_string()]);
    }

    #[test]
    fn test_event_history() {
        let mut dom = MockDom::new();
        dom.dispatch_event(DomEvent::click("btn-1"));
        dom.dispatch_event(DomEvent::key_down("2"));
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    // ===== Rendering =====

    #[test]
    fn test_render_creates_region_before_display() {
        let mut dom = MockDom::calculator();
        let mut calc = KeypadCalculator::new();
        calc.press_digit(5);
        calc.press_operator(Operation::Add);
        dom.render(&calc);

        assert_eq!(dom.get_element_text(OPERATION_ID), Some("5 +"));
        assert_eq!(
            dom.screen_order(),
            [OPERATION_ID.to_string(), DISPLAY_ID.to_string()]
        );
    }

    #[test]
    fn test_render_removes_region_on_clear() {
        let mut dom = MockDom::calculator();
        let mut calc = KeypadCalculator::new();
        calc.press_digit(5);
        calc.press_operator(Operation::Add);
        dom.render(&calc);
        calc.clear();
        dom.render(&calc);

        assert!(dom.get_element(OPERATION_ID).is_none());
        assert_eq!(dom.get_element_text(DISPLAY_ID), Some("0"));
    }

    #[test]
    fn test_render_keeps_blank_region() {
        let mut dom = MockDom::calculator();
        let mut calc = KeypadCalculator::new();
        calc.press_digit(2);
        calc.press_operator(Operation::Multiply);
        calc.press_digit(3);
        calc.press_equals();
        calc.advance_to(2000);
        dom.render(&calc);

        assert_eq!(dom.get_element_text(OPERATION_ID), Some(""));
        assert_eq!(dom.get_element_text(DISPLAY_ID), Some("6"));
    }

    #[test]
    fn test_render_shows_notice() {
        let mut dom = MockDom::calculator();
        let mut calc = KeypadCalculator::new();
        calc.press_digit(2);
        calc.press_operator(Operation::Divide);
        calc.press_digit(0);
        calc.press_equals();
        dom.render(&calc);

        assert_eq!(
            dom.get_element_text(DISPLAY_ID),
            Some("Erreur: Division par zéro !")
        );
        assert!(dom.get_element(OPERATION_ID).is_none());
    }
}
