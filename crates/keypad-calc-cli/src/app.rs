//! Terminal application state
//!
//! Wraps the calculator with a wall clock so delayed annotation clears fire
//! while the event loop waits for input.

use std::time::{Duration, Instant};

use keypad_calc::prelude::*;

/// Calculator application driven by terminal key events
#[derive(Debug)]
pub struct TerminalApp {
    calculator: KeypadCalculator,
    keypad: Keypad,
    started: Instant,
    last_outcome: Option<Outcome>,
    should_quit: bool,
}

impl Default for TerminalApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalApp {
    /// Creates an app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates an app from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            calculator: KeypadCalculator::with_config(config),
            keypad: Keypad::new(),
            started: Instant::now(),
            last_outcome: None,
            should_quit: false,
        }
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &KeypadCalculator {
        &self.calculator
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Outcome of the most recent input
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        tracing::debug!("quit requested");
        self.should_quit = true;
    }

    /// Syncs the logical clock with wall time.
    ///
    /// Returns true when an annotation clear fired and a redraw is due.
    pub fn tick(&mut self) -> bool {
        let elapsed = self.started.elapsed().as_millis() as u64;
        self.calculator.advance_to(elapsed) > 0
    }
}

impl CalculatorDriver for TerminalApp {
    fn press(&mut self, action: KeypadAction) -> Outcome {
        let outcome = self.calculator.handle(action);
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn display(&self) -> String {
        self.calculator.screen_text().to_string()
    }

    fn annotation(&self) -> Option<String> {
        self.calculator.annotation().map(str::to_string)
    }

    fn advance(&mut self, elapsed: Duration) {
        self.calculator.advance(elapsed);
    }
}
