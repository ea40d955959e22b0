//! Keypad state machine
//!
//! Error prevention: every input event runs one handler to completion and
//! leaves the calculator in a displayable state.

use serde::Serialize;
use std::time::Duration;

use crate::config::CalculatorConfig;
use crate::core::format::DisplayFormat;
use crate::core::operand::{coerce, parse_float_prefix, Operand};
use crate::core::schedule::{AnnotationClearPolicy, AnnotationScheduler};
use crate::core::{CalcError, Operation};
use crate::keypad::KeypadAction;

/// What a single input event did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Visible state changed
    Updated,
    /// The event was rejected by a guard and changed nothing
    Ignored,
    /// An evaluation completed with this raw result
    Evaluated(f64),
    /// An evaluation failed and the calculator was cleared
    Failed(CalcError),
}

/// Observable calculator state, for assertions and serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Primary display text
    pub display: String,
    /// Secondary annotation region, `None` when absent
    pub annotation: Option<String>,
    /// First operand as it would appear in the annotation
    pub first_operand: Option<String>,
    /// Pending operator
    pub pending: Option<Operation>,
    /// Next digit starts a fresh entry
    pub reset_on_next_digit: bool,
    /// An operator was the last accepted input
    pub last_was_operator: bool,
    /// Error message shown over the display
    pub notice: Option<String>,
}

/// Single-operation keypad calculator
#[derive(Debug, Clone)]
pub struct KeypadCalculator {
    display: String,
    first_operand: Option<Operand>,
    pending: Option<Operation>,
    reset_on_next_digit: bool,
    last_was_operator: bool,
    annotation: Option<String>,
    /// Bumped on every annotation write, keys scheduled clears
    annotation_revision: u64,
    notice: Option<String>,
    scheduler: AnnotationScheduler,
    format: DisplayFormat,
    error_prefix: String,
}

impl Default for KeypadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadCalculator {
    /// Creates a calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a calculator from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            display: "0".to_string(),
            first_operand: None,
            pending: None,
            reset_on_next_digit: false,
            last_was_operator: false,
            annotation: None,
            annotation_revision: 0,
            notice: None,
            scheduler: AnnotationScheduler::new(
                config.annotation_policy,
                config.annotation_delay(),
            ),
            format: config.display_format(),
            error_prefix: config.error_prefix.clone(),
        }
    }

    // ===== Accessors =====

    /// Primary display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// What the primary region shows: the error notice if one is up
    #[must_use]
    pub fn screen_text(&self) -> &str {
        self.notice.as_deref().unwrap_or(&self.display)
    }

    /// Error notice from the last failed evaluation
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Annotation text, `None` when the region does not exist
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Captured first operand
    #[must_use]
    pub fn first_operand(&self) -> Option<&Operand> {
        self.first_operand.as_ref()
    }

    /// Pending operator
    #[must_use]
    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending
    }

    /// Whether the next digit starts a fresh entry
    #[must_use]
    pub fn reset_on_next_digit(&self) -> bool {
        self.reset_on_next_digit
    }

    /// Whether the last accepted input was an operator
    #[must_use]
    pub fn last_was_operator(&self) -> bool {
        self.last_was_operator
    }

    /// Annotation clear policy in effect
    #[must_use]
    pub fn annotation_policy(&self) -> AnnotationClearPolicy {
        self.scheduler.policy()
    }

    /// Annotation clears still waiting to fire
    #[must_use]
    pub fn pending_annotation_clears(&self) -> usize {
        self.scheduler.pending_len()
    }

    /// Current logical time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Captures the observable state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            annotation: self.annotation.clone(),
            first_operand: self.first_operand.as_ref().map(ToString::to_string),
            pending: self.pending,
            reset_on_next_digit: self.reset_on_next_digit,
            last_was_operator: self.last_was_operator,
            notice: self.notice.clone(),
        }
    }

    // ===== Event dispatch =====

    /// Handles one keypad action
    pub fn handle(&mut self, action: KeypadAction) -> Outcome {
        tracing::debug!(?action, display = %self.display, "keypad event");
        match action {
            KeypadAction::Digit(d) => self.press_digit(d),
            KeypadAction::Decimal => self.press_decimal(),
            KeypadAction::Operator(op) => self.press_operator(op),
            KeypadAction::Equals => self.press_equals(),
            KeypadAction::Percent => self.press_percent(),
            KeypadAction::Backspace => self.press_backspace(),
            KeypadAction::Clear => {
                self.clear();
                Outcome::Updated
            }
        }
    }

    /// Enters a digit (0-9)
    pub fn press_digit(&mut self, digit: u8) -> Outcome {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return Outcome::Ignored;
        };
        self.notice = None;

        if self.reset_on_next_digit || self.display == "0" {
            self.reset_display();
        }
        if self.last_was_operator {
            self.reset_display();
            self.last_was_operator = false;
        }

        if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
        Outcome::Updated
    }

    /// Enters a decimal point, at most one per entry
    pub fn press_decimal(&mut self) -> Outcome {
        self.notice = None;
        if self.reset_on_next_digit {
            self.reset_display();
        }
        self.last_was_operator = false;

        if self.display.contains('.') {
            return Outcome::Ignored;
        }
        self.display.push('.');
        Outcome::Updated
    }

    /// Accepts an operator, evaluating a pending one first if an operand
    /// was typed since
    pub fn press_operator(&mut self, op: Operation) -> Outcome {
        self.notice = None;
        let current = self.display.clone();
        let mut outcome = Outcome::Updated;

        match (self.pending, self.first_operand.take()) {
            (Some(pending), Some(first)) if !self.last_was_operator => {
                match pending.apply(first.value(), coerce(&current)) {
                    Ok(result) => {
                        self.display = self.format.format_number(result);
                        self.first_operand = Some(Operand::Value(result));
                        outcome = Outcome::Evaluated(result);
                    }
                    Err(err) => return self.fail(err),
                }
            }
            (_, None) => self.first_operand = Some(Operand::Text(current)),
            (_, first) => self.first_operand = first,
        }

        if let Some(first) = &self.first_operand {
            let trace = format!("{first} {}", op.symbol());
            self.set_annotation(trace);
        }
        self.pending = Some(op);
        self.reset_on_next_digit = true;
        self.last_was_operator = true;
        outcome
    }

    /// Evaluates the pending operation against the display
    pub fn press_equals(&mut self) -> Outcome {
        let (Some(op), Some(first)) = (self.pending, self.first_operand.clone()) else {
            return Outcome::Ignored;
        };
        self.notice = None;

        let current = self.display.clone();
        self.set_annotation(format!("{first} {} {current} =", op.symbol()));

        match op.apply(first.value(), coerce(&current)) {
            Ok(result) => {
                self.display = self.format.format_number(result);
                self.first_operand = Some(Operand::Value(result));
                self.pending = None;
                self.reset_on_next_digit = true;
                self.last_was_operator = false;
                let task = self.scheduler.schedule(self.annotation_revision);
                tracing::debug!(result, due_ms = task.due_ms, "evaluated");
                Outcome::Evaluated(result)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Divides the leading number on the display by 100
    pub fn press_percent(&mut self) -> Outcome {
        self.notice = None;
        let value = parse_float_prefix(&self.display) / 100.0;
        self.display = self.format.format_number(value);
        Outcome::Updated
    }

    /// Removes the last display character, bottoming out at "0"
    pub fn press_backspace(&mut self) -> Outcome {
        self.notice = None;
        if self.display.chars().count() <= 1 {
            self.display = "0".to_string();
        } else {
            self.display.pop();
        }
        Outcome::Updated
    }

    /// Resets every field and removes the annotation region.
    ///
    /// Scheduled annotation clears stay queued; under the detached policy
    /// they still fire later.
    pub fn clear(&mut self) {
        self.first_operand = None;
        self.pending = None;
        self.reset_on_next_digit = false;
        self.last_was_operator = false;
        self.notice = None;
        if self.annotation.take().is_some() {
            self.annotation_revision += 1;
        }
        self.reset_display();
    }

    // ===== Time =====

    /// Advances the logical clock and fires due annotation clears.
    ///
    /// Returns the number of clears applied.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        let fired = self.scheduler.advance_to(now_ms, self.annotation_revision);
        if fired > 0 {
            tracing::trace!(fired, now_ms, "annotation clear fired");
            if let Some(annotation) = self.annotation.as_mut() {
                annotation.clear();
                self.annotation_revision += 1;
            }
        }
        fired
    }

    /// Advances the logical clock by a duration
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let now = self.now_ms().saturating_add(elapsed.as_millis() as u64);
        self.advance_to(now)
    }

    // ===== Internals =====

    fn reset_display(&mut self) {
        self.display = "0".to_string();
        self.reset_on_next_digit = false;
    }

    fn set_annotation(&mut self, text: String) {
        self.annotation = Some(text);
        self.annotation_revision += 1;
    }

    fn fail(&mut self, err: CalcError) -> Outcome {
        let message = format!("{}{err}", self.error_prefix);
        tracing::warn!(%err, "evaluation failed, clearing calculator");
        self.clear();
        self.notice = Some(message);
        Outcome::Failed(err)
    }
}
