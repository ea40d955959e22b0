//! Arithmetic primitives and operator dispatch

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operation a keypad operator button can leave pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Remainder (%)
    Modulo,
}

impl Operation {
    /// All operations, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
    ];

    /// Returns the ASCII token used by keys and button identities
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Returns the typographic symbol shown in the annotation
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{d7}",
            Self::Divide => "\u{f7}",
            Self::Modulo => "%",
        }
    }

    /// Parses an ASCII token
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Applies the operation to two operands
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(Calculator::add(a, b)),
            Self::Subtract => Ok(Calculator::subtract(a, b)),
            Self::Multiply => Ok(Calculator::multiply(a, b)),
            Self::Divide => Calculator::divide(a, b),
            Self::Modulo => Ok(Calculator::modulo(a, b)),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The arithmetic primitives
///
/// Only division can fail. The others follow IEEE 754, so overflow gives an
/// infinity and `x % 0` gives NaN.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Addition: a + b
    #[must_use]
    pub fn add(a: f64, b: f64) -> f64 {
        a + b
    }

    /// Subtraction: a - b
    #[must_use]
    pub fn subtract(a: f64, b: f64) -> f64 {
        a - b
    }

    /// Multiplication: a * b
    #[must_use]
    pub fn multiply(a: f64, b: f64) -> f64 {
        a * b
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        // -0.0 == 0.0, so both zeros are rejected
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Remainder: a % b, sign follows the dividend
    #[must_use]
    pub fn modulo(a: f64, b: f64) -> f64 {
        a % b
    }
}

/// Dispatches a textual operator token to its primitive.
///
/// Returns `Ok(None)` for a token that names no operation.
pub fn operate(token: &str, a: f64, b: f64) -> CalcResult<Option<f64>> {
    match Operation::from_token(token) {
        Some(op) => op.apply(a, b).map(Some),
        None => Ok(None),
    }
}
