//! keypad-calc CLI: terminal front-end for the keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc                                  # Run with defaults
//! keypad-calc --config calc.json               # Load settings from JSON
//! keypad-calc --annotation-policy superseded   # Cancel stale annotation clears
//! RUST_LOG=keypad_calc=debug keypad-calc 2>calc.log
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod app;
mod commands;
mod error;
pub mod logging;
pub mod terminal;

pub use app::TerminalApp;
pub use commands::{Cli, PolicyArg};
pub use error::{CliError, CliResult};

use keypad_calc::prelude::CalculatorConfig;

/// Builds the calculator configuration from CLI arguments
pub fn build_config(cli: &Cli) -> CliResult<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(policy) = cli.annotation_policy {
        config = config.with_annotation_policy(policy.into());
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use keypad_calc::prelude::AnnotationClearPolicy;
    use std::io::Write;

    #[test]
    fn test_build_config_defaults() {
        let cli = Cli::try_parse_from(["keypad-calc"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_build_config_policy_override() {
        let cli = Cli::try_parse_from(["keypad-calc", "--annotation-policy", "superseded"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Superseded);
    }

    #[test]
    fn test_build_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"annotation_clear_delay_ms": 500, "annotation_policy": "superseded"}}"#)
            .unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["keypad-calc", "--config", path]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.annotation_clear_delay_ms, 500);
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Superseded);
    }

    #[test]
    fn test_build_config_flag_beats_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"annotation_policy": "superseded"}}"#).unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "keypad-calc",
            "--config",
            path,
            "--annotation-policy",
            "detached",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.annotation_policy, AnnotationClearPolicy::Detached);
    }

    #[test]
    fn test_build_config_missing_file() {
        let cli = Cli::try_parse_from(["keypad-calc", "--config", "/nonexistent/calc.json"])
            .unwrap();
        let err = build_config(&cli).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_build_config_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"display_max_len": 0}}"#).unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["keypad-calc", "--config", path]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
