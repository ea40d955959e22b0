//! Keypad Calculator
//!
//! A single-operation keypad calculator: digit entry, one pending binary
//! operator, percentage and backspace edits, and a keyboard mirror of the
//! on-screen buttons. The state machine is plain Rust, so the same logic
//! drives the mock DOM in tests, the terminal front-end and the browser.
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut calc = KeypadCalculator::new();
//! calc.press_digit(5);
//! calc.press_operator(Operation::Add);
//! calc.press_digit(3);
//! calc.press_equals();
//!
//! assert_eq!(calc.display(), "8");
//! assert_eq!(calc.annotation(), Some("5 + 3 ="));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod view;

/// Browser bindings
#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::format::{format_value, DisplayFormat, DisplayValue};
    pub use crate::core::operand::Operand;
    pub use crate::core::schedule::AnnotationClearPolicy;
    pub use crate::core::{operate, CalcError, CalcResult, KeypadCalculator, Operation, Outcome};
    pub use crate::driver::{CalculatorDriver, DomDriver};
    pub use crate::keypad::{Keypad, KeypadAction};
    pub use crate::view::{DomElement, DomEvent, MockDom};

    #[cfg(feature = "wasm")]
    pub use crate::browser::BrowserCalculator;
}
