//! Unified Calculator Driver
//!
//! Write the interaction once, run it against any front-end: the mock DOM
//! here, the terminal app in `keypad-calc-cli`.
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::driver::{CalculatorDriver, DomDriver};
//!
//! let mut driver = DomDriver::new();
//! driver.type_keys(&["5", "+", "3", "Enter"]);
//! assert_eq!(driver.display(), "8");
//! assert_eq!(driver.annotation().as_deref(), Some("5 + 3 ="));
//! ```

use std::time::Duration;

use crate::config::CalculatorConfig;
use crate::core::{KeypadCalculator, Outcome};
use crate::keypad::{Keypad, KeypadAction};
use crate::view::{DomEvent, MockDom, DISPLAY_ID, OPERATION_ID};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Performs one keypad action
    fn press(&mut self, action: KeypadAction) -> Outcome;

    /// Presses a keyboard key; unmapped keys are ignored
    fn press_key(&mut self, key: &str) -> Outcome {
        match Keypad::key_to_action(key) {
            Some(action) => self.press(action),
            None => Outcome::Ignored,
        }
    }

    /// Presses a sequence of keys
    fn type_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.press_key(key);
        }
    }

    /// Text in the primary region
    fn display(&self) -> String;

    /// Text in the annotation region, `None` when it does not exist
    fn annotation(&self) -> Option<String>;

    /// Lets time pass
    fn advance(&mut self, elapsed: Duration);

    /// Clears the calculator
    fn clear(&mut self) {
        self.press(KeypadAction::Clear);
    }
}

/// Driver running the calculator against a mock DOM
#[derive(Debug)]
pub struct DomDriver {
    calculator: KeypadCalculator,
    keypad: Keypad,
    dom: MockDom,
}

impl Default for DomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomDriver {
    /// Creates a driver with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a driver from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            calculator: KeypadCalculator::with_config(config),
            keypad: Keypad::new(),
            dom: MockDom::calculator(),
        }
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &KeypadCalculator {
        &self.calculator
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Simulates clicking an element; clicks off the keypad do nothing
    pub fn click(&mut self, element_id: &str) -> Outcome {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let outcome = match self.keypad.handle_click(element_id) {
            Some(action) => self.calculator.handle(action),
            None => Outcome::Ignored,
        };
        self.dom.render(&self.calculator);
        outcome
    }

    /// Simulates a key down event
    pub fn key_down(&mut self, key: &str) -> Outcome {
        self.dom.dispatch_event(DomEvent::key_down(key));
        let outcome = match Keypad::key_to_action(key) {
            Some(action) => self.calculator.handle(action),
            None => Outcome::Ignored,
        };
        self.dom.render(&self.calculator);
        outcome
    }
}

impl CalculatorDriver for DomDriver {
    fn press(&mut self, action: KeypadAction) -> Outcome {
        match self.keypad.find_button_by_action(action) {
            Some(button) => {
                let id = button.id.clone();
                self.click(&id)
            }
            // Modulo has no button; apply it directly
            None => {
                let outcome = self.calculator.handle(action);
                self.dom.render(&self.calculator);
                outcome
            }
        }
    }

    fn press_key(&mut self, key: &str) -> Outcome {
        self.key_down(key)
    }

    fn display(&self) -> String {
        self.dom
            .get_element_text(DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn annotation(&self) -> Option<String> {
        self.dom.get_element_text(OPERATION_ID).map(str::to_string)
    }

    fn advance(&mut self, elapsed: Duration) {
        self.calculator.advance(elapsed);
        self.dom.render(&self.calculator);
    }
}
