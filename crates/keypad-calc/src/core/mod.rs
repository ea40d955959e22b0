//! Core calculator logic: arithmetic, display formatting and the keypad
//! state machine.
//!
//! Nothing in here touches a terminal or a browser, so every transition can
//! be driven directly from unit tests.

pub mod format;
pub mod operand;
mod operations;
pub mod schedule;
mod state;

pub use operations::{operate, Calculator, Operation};
pub use state::{KeypadCalculator, Outcome, Snapshot};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Division by zero is the only failure the keypad can produce; everything
/// else is total over `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a divisor of exactly zero
    #[error("Division par zéro !")]
    DivisionByZero,
}
