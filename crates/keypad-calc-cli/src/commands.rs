//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use keypad_calc::prelude::AnnotationClearPolicy;

/// keypad-calc: keypad calculator in the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "KEYPAD_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the annotation clear policy from the config
    #[arg(long, value_enum)]
    pub annotation_policy: Option<PolicyArg>,

    /// Log filter used when RUST_LOG is unset (e.g. `warn`, `keypad_calc=debug`)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Annotation clear policy argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyArg {
    /// Scheduled clears always fire
    #[default]
    Detached,
    /// Later annotations cancel earlier clears
    Superseded,
}

impl From<PolicyArg> for AnnotationClearPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Detached => Self::Detached,
            PolicyArg::Superseded => Self::Superseded,
        }
    }
}
