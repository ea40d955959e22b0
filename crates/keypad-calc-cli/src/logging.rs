//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with the calculator screen.
//! `RUST_LOG` wins over `--log-level` when set.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Builds the filter from `RUST_LOG`, falling back to `default_directives`
pub fn build_filter(default_directives: &str) -> CliResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directives).map_err(|e| {
            CliError::invalid_argument(format!("log level '{default_directives}': {e}"))
        }),
    }
}

/// Installs the global fmt subscriber
pub fn init(default_directives: &str) -> CliResult<()> {
    let filter = build_filter(default_directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_level() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_filter("debug").is_ok());
        }
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_filter("warn,keypad_calc=trace").is_ok());
        }
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        if std::env::var_os("RUST_LOG").is_none() {
            let err = build_filter("keypad_calc=loud").unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }
    }
}
