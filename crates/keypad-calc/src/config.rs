//! Calculator configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::core::format::DisplayFormat;
use crate::core::schedule::AnnotationClearPolicy;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for this schema
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Tunables for the keypad calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Milliseconds an evaluation trace stays visible
    pub annotation_clear_delay_ms: u64,
    /// Whether later activity cancels a pending trace clear
    pub annotation_policy: AnnotationClearPolicy,
    /// Longest plain number before exponential notation
    pub display_max_len: usize,
    /// Decimal places kept when rounding results
    pub round_decimals: u32,
    /// Fractional digits in exponential notation
    pub exponent_digits: usize,
    /// Text placed before error messages
    pub error_prefix: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            annotation_clear_delay_ms: 2000,
            annotation_policy: AnnotationClearPolicy::Detached,
            display_max_len: 10,
            round_decimals: 10,
            exponent_digits: 5,
            error_prefix: "Erreur: ".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Highest rounding precision an f64 can honour
    pub const MAX_ROUND_DECIMALS: u32 = 15;

    /// Create a default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annotation clear policy
    #[must_use]
    pub fn with_annotation_policy(mut self, policy: AnnotationClearPolicy) -> Self {
        self.annotation_policy = policy;
        self
    }

    /// Set the annotation clear delay
    #[must_use]
    pub fn with_annotation_delay(mut self, delay: Duration) -> Self {
        self.annotation_clear_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Parses and validates a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading calculator config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_max_len == 0 {
            return Err(ConfigError::Invalid {
                field: "display_max_len",
                message: "must be at least 1".to_string(),
            });
        }
        if self.round_decimals > Self::MAX_ROUND_DECIMALS {
            return Err(ConfigError::Invalid {
                field: "round_decimals",
                message: format!("must be at most {}", Self::MAX_ROUND_DECIMALS),
            });
        }
        if self.exponent_digits > 20 {
            return Err(ConfigError::Invalid {
                field: "exponent_digits",
                message: "must be at most 20".to_string(),
            });
        }
        Ok(())
    }

    /// Annotation clear delay as a duration
    #[must_use]
    pub fn annotation_delay(&self) -> Duration {
        Duration::from_millis(self.annotation_clear_delay_ms)
    }

    /// Display rules derived from this config
    #[must_use]
    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat {
            round_decimals: self.round_decimals,
            max_len: self.display_max_len,
            exponent_digits: self.exponent_digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.annotation_delay(), Duration::from_secs(2));
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Detached);
        assert_eq!(config.error_prefix, "Erreur: ");
        assert_eq!(config.display_format(), DisplayFormat::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::new()
            .with_annotation_policy(AnnotationClearPolicy::Superseded)
            .with_annotation_delay(Duration::from_millis(250));
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Superseded);
        assert_eq!(config.annotation_clear_delay_ms, 250);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            CalculatorConfig::from_json_str(r#"{"annotation_policy": "superseded"}"#).unwrap();
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Superseded);
        assert_eq!(config.display_max_len, 10);
    }

    #[test]
    fn test_invalid_json() {
        let err = CalculatorConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{"annotation_policy": "never"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_display_len_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{"display_max_len": 0}"#).unwrap_err();
        assert!(err.to_string().contains("display_max_len"));
    }

    #[test]
    fn test_excess_decimals_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{"round_decimals": 16}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "round_decimals",
                ..
            }
        ));
    }

    #[test]
    fn test_excess_exponent_digits_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{"exponent_digits": 21}"#).unwrap_err();
        assert!(err.to_string().contains("exponent_digits"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"annotation_clear_delay_ms": 500}}"#).unwrap();
        let config = CalculatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.annotation_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_missing_file() {
        let err = CalculatorConfig::from_file("/nonexistent/keypad-calc.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_roundtrip_json() {
        let config = CalculatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CalculatorConfig::from_json_str(&json).unwrap(), config);
    }
}
