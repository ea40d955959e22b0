//! Browser WASM bindings for the keypad calculator
//!
//! The page wires button clicks and `keydown` events to
//! [`BrowserCalculator::handle_button`] and [`BrowserCalculator::handle_key`],
//! and calls [`BrowserCalculator::tick`] from a timer so delayed annotation
//! clears fire.

// Note: compiled only with the `wasm` feature, see lib.rs

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::CalculatorConfig;
use crate::core::{KeypadCalculator, Outcome};
use crate::keypad::{Keypad, KeypadAction};

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    calculator: KeypadCalculator,
    keypad: Keypad,
    /// Host time of the first tick; logical time counts from here
    epoch_ms: Option<f64>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a calculator with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::from_config(&CalculatorConfig::default())
    }

    /// Create a calculator from a JSON config; falls back to defaults when
    /// the JSON is invalid
    pub fn with_config_json(json: &str) -> Self {
        console_error_panic_hook::set_once();
        let config = CalculatorConfig::from_json_str(json).unwrap_or_else(|err| {
            console::warn_1(&format!("keypad-calc: {err}, using defaults").into());
            CalculatorConfig::default()
        });
        Self::from_config(&config)
    }

    /// Text for the primary display
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.calculator.screen_text().to_string()
    }

    /// Text for the operation region, `undefined` when it should not exist
    #[wasm_bindgen(getter)]
    pub fn annotation(&self) -> Option<String> {
        self.calculator.annotation().map(str::to_string)
    }

    /// Handle a keypad button click by element ID; returns whether the
    /// id belonged to a keypad button
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        match self.keypad.handle_click(button_id) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Handle a `KeyboardEvent.key`; returns whether the key was mapped so
    /// the page can call `preventDefault`
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Keypad::key_to_action(key) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Advance the logical clock to `now_ms` (e.g. `performance.now()`);
    /// returns whether the annotation changed.
    ///
    /// The first tick only anchors host time, so clears scheduled before it
    /// are due a full delay after that tick.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let epoch = *self.epoch_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - epoch).max(0.0);
        self.calculator.advance_to(elapsed as u64) > 0
    }

    /// Observable state as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.calculator.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserCalculator {
    fn from_config(config: &CalculatorConfig) -> Self {
        Self {
            calculator: KeypadCalculator::with_config(config),
            keypad: Keypad::new(),
            epoch_ms: None,
        }
    }

    fn handle_action(&mut self, action: KeypadAction) {
        if let Outcome::Failed(err) = self.calculator.handle(action) {
            console::error_1(&format!("keypad-calc: {err}").into());
        }
    }
}
