//! Display formatting
//!
//! Numbers are rendered the way a browser renders them with `String(n)`,
//! after rounding away floating-point noise. Anything longer than the
//! display width falls back to fixed-precision exponential notation.

use serde::{Deserialize, Serialize};

/// A value headed for the primary display
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// A computed number, subject to rounding and width limits
    Number(f64),
    /// Free text such as an error message, shown as-is
    Text(String),
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DisplayValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Rounding and width rules for the primary display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Decimal places kept after rounding
    pub round_decimals: u32,
    /// Longest plain rendering before switching to exponential notation
    pub max_len: usize,
    /// Fractional digits in the exponential fallback
    pub exponent_digits: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            round_decimals: 10,
            max_len: 10,
            exponent_digits: 5,
        }
    }
}

impl DisplayFormat {
    /// Formats any display value
    #[must_use]
    pub fn format(&self, value: &DisplayValue) -> String {
        match value {
            DisplayValue::Number(n) => self.format_number(*n),
            DisplayValue::Text(text) => text.clone(),
        }
    }

    /// Rounds and renders a number for the display
    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        let rounded = self.round(value);
        let plain = number_to_string(rounded);
        if plain.chars().count() > self.max_len {
            to_exponential(rounded, self.exponent_digits)
        } else {
            plain
        }
    }

    /// Rounds to `round_decimals` places, halves toward positive infinity
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.round_decimals as i32);
        round_half_up(value * factor) / factor
    }
}

/// Formats a number with the default display rules
#[must_use]
pub fn format_value(value: f64) -> String {
    DisplayFormat::default().format_number(value)
}

/// Rounds to the nearest integer, breaking ties toward positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    // Exact for every finite f64: values past 2^52 have no fraction.
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Renders a number the way `String(n)` does in a browser.
///
/// Shortest round-trip digits; plain notation for magnitudes in
/// `[1e-6, 1e21)`, exponential with an explicit exponent sign otherwise.
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}")
    } else {
        sign_exponent(&format!("{value:e}"))
    }
}

/// Significant digits after the point that hold any f64 exactly
const EXACT_DIGITS: usize = 767;

/// Renders a number the way `n.toExponential(digits)` does in a browser.
///
/// The mantissa is cut from the exact decimal expansion and rounded half
/// away from zero, so exact ties pick the larger magnitude.
#[must_use]
pub fn to_exponential(value: f64, digits: usize) -> String {
    if value.is_nan() || value.is_infinite() {
        return number_to_string(value);
    }
    let exact = format!("{:.*e}", EXACT_DIGITS.max(digits), value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return sign_exponent(&exact);
    };
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut kept: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let round_up = kept.get(digits + 1).is_some_and(|d| *d >= b'5');
    kept.truncate(digits + 1);

    if round_up && increment_digits(&mut kept) {
        // 9.99..9 carried over into 10.00..0
        kept.insert(0, b'1');
        kept.pop();
        exponent += 1;
    }

    let mut out = String::with_capacity(digits + 8);
    if value < 0.0 {
        out.push('-');
    }
    let (lead, fraction) = kept.split_at(1);
    out.push(char::from(lead[0]));
    if !fraction.is_empty() {
        out.push('.');
        out.extend(fraction.iter().map(|d| char::from(*d)));
    }
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&exponent.abs().to_string());
    out
}

/// Adds one to a decimal digit string; returns true on carry out
fn increment_digits(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    true
}

/// Rewrites `1.5e7` as `1.5e+7`
fn sign_exponent(rendered: &str) -> String {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== number_to_string =====

    #[test]
    fn test_integers_render_plain() {
        assert_eq!(number_to_string(8.0), "8");
        assert_eq!(number_to_string(-42.0), "-42");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_decimals_render_shortest() {
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(-0.0), "0");
    }

    #[test]
    fn test_large_and_tiny_use_exponent() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(-2e-10), "-2e-10");
    }

    // ===== to_exponential =====

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(12345678901.0, 5), "1.23457e+10");
        assert_eq!(to_exponential(0.000123456789, 5), "1.23457e-4");
        assert_eq!(to_exponential(1.0, 5), "1.00000e+0");
        assert_eq!(to_exponential(f64::NAN, 5), "NaN");
    }

    #[test]
    fn test_to_exponential_ties_round_away_from_zero() {
        assert_eq!(to_exponential(12345650000.0, 5), "1.23457e+10");
        assert_eq!(to_exponential(-10000050000.0, 5), "-1.00001e+10");
        assert_eq!(to_exponential(2.5, 0), "3e+0");
        assert_eq!(to_exponential(0.125, 1), "1.3e-1");
    }

    #[test]
    fn test_to_exponential_carry_bumps_exponent() {
        assert_eq!(to_exponential(9999995.0, 5), "1.00000e+7");
        assert_eq!(to_exponential(-9999995.0, 5), "-1.00000e+7");
    }

    #[test]
    fn test_to_exponential_below_tie_rounds_down() {
        // 0.15 is stored just below the tie
        assert_eq!(to_exponential(0.15, 0), "1e-1");
        assert_eq!(to_exponential(0.0, 5), "0.00000e+0");
    }

    // ===== round_half_up =====

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert!(round_half_up(f64::NAN).is_nan());
    }

    // ===== DisplayFormat =====

    #[test]
    fn test_format_suppresses_float_noise() {
        assert_eq!(format_value(0.1 + 0.2), "0.3");
        assert_eq!(format_value(8.0), "8");
    }

    #[test]
    fn test_format_long_plain_switches_to_exponent() {
        assert_eq!(format_value(12345678901.0), "1.23457e+10");
        assert_eq!(format_value(12345650000.0), "1.23457e+10");
        assert_eq!(format_value(-10000050000.0), "-1.00001e+10");
        assert_eq!(format_value(1.0 / 3.0), "3.33333e-1");
    }

    #[test]
    fn test_format_exactly_max_len_stays_plain() {
        assert_eq!(format_value(1234567890.0), "1234567890");
        assert_eq!(format_value(0.12345678), "0.12345678");
    }

    #[test]
    fn test_format_smallest_rounded_value() {
        // 1e-10 survives rounding and renders as "1e-10" (5 chars)
        assert_eq!(format_value(1e-10), "1e-10");
        assert_eq!(format_value(1e-11), "0");
    }

    #[test]
    fn test_format_percentage_result() {
        assert_eq!(format_value(50.0 / 100.0), "0.5");
    }

    #[test]
    fn test_format_text_passes_through() {
        let format = DisplayFormat::default();
        let text = DisplayValue::from("Erreur: Division par zéro !");
        assert_eq!(format.format(&text), "Erreur: Division par zéro !");
    }

    #[test]
    fn test_format_number_value() {
        let format = DisplayFormat::default();
        assert_eq!(format.format(&DisplayValue::from(2.5)), "2.5");
    }

    #[test]
    fn test_custom_format() {
        let format = DisplayFormat {
            round_decimals: 2,
            max_len: 6,
            exponent_digits: 2,
        };
        assert_eq!(format.format_number(3.14159), "3.14");
        assert_eq!(format.format_number(1234567.0), "1.23e+6");
    }

    #[test]
    fn test_format_infinity() {
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
    }

    proptest! {
        #[test]
        fn prop_formatted_output_is_bounded(v in -1e15f64..1e15f64) {
            let text = format_value(v);
            if text.contains('e') {
                // exponential fallback: mantissa keeps 5 fractional digits
                let mantissa = text.split('e').next().unwrap();
                let fraction = mantissa.split('.').nth(1).unwrap_or("");
                prop_assert_eq!(fraction.len(), 5);
            } else {
                prop_assert!(text.chars().count() <= 10);
                let fraction = text.split('.').nth(1).unwrap_or("");
                prop_assert!(fraction.len() <= 10);
            }
        }

        #[test]
        fn prop_exponential_ties_pick_larger_magnitude(
            lead in 100_000u64..1_000_000u64,
            shift in 0u32..8,
            negative in any::<bool>(),
        ) {
            // lead followed by a 5 is an exact tie at six significant digits
            let magnitude = (lead * 10 + 5) * 10u64.pow(shift);
            let value = if negative { -(magnitude as f64) } else { magnitude as f64 };

            let mut rounded = lead + 1;
            let mut exponent = 6 + shift;
            if rounded == 1_000_000 {
                rounded = 100_000;
                exponent += 1;
            }
            let digits = rounded.to_string();
            let expected = format!(
                "{}{}.{}e+{}",
                if negative { "-" } else { "" },
                &digits[..1],
                &digits[1..],
                exponent
            );
            prop_assert_eq!(to_exponential(value, 5), expected);
        }

        #[test]
        fn prop_small_integers_render_exactly(n in -99_999_999i64..99_999_999i64) {
            prop_assert_eq!(format_value(n as f64), n.to_string());
        }
    }
}
