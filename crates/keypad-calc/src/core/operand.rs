//! Operands held between key presses
//!
//! A first operand is captured either from the display text or from a
//! previous result. Text is only coerced to a number when an operation runs.

use crate::core::format::number_to_string;

/// A pending first operand
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Captured verbatim from the display
    Text(String),
    /// Raw result of a previous evaluation
    Value(f64),
}

impl Operand {
    /// Numeric value used for evaluation
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Text(text) => coerce(text),
            Self::Value(v) => *v,
        }
    }
}

impl std::fmt::Display for Operand {
    /// Text operands print as captured; results print unrounded.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Value(v) => f.write_str(&number_to_string(*v)),
        }
    }
}

/// Coerces display text to a number.
///
/// Blank text is zero, unparseable text is NaN. Trailing points (`"5."`),
/// leading points (`".5"`), exponents and `Infinity` all parse.
#[must_use]
pub fn coerce(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also accepts "inf" and "nan", which the display never shows
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Parses the longest numeric prefix of the text, like `parseFloat`.
///
/// `"9.99989e+"` reads as `9.99989`, `"12abc"` as `12`. Text with no
/// leading number is NaN.
#[must_use]
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
