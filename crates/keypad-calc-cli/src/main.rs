//! keypad-calc: keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc
//! keypad-calc --config calc.json --annotation-policy superseded
//! ```

use clap::Parser;
use keypad_calc_cli::{build_config, logging, terminal, Cli, CliResult, TerminalApp};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let config = build_config(&cli)?;
    let mut app = TerminalApp::with_config(&config);
    tracing::info!(policy = ?config.annotation_policy, "starting keypad calculator");

    terminal::run(&mut app)
}
