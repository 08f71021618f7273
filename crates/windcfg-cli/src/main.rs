//! windcfg - utility-CSS configuration checker and exporter
//!
//! Main entry point for the `windcfg` binary.

use std::process::ExitCode;

use clap::Parser;
use windcfg_log::{LogConfig, LogLevel};

mod cli;
mod commands;
mod error;

use cli::Cli;

/// Application exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env();
    let log_config = if cli.verbose > 0 || cli.quiet {
        log_config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet))
    } else {
        log_config
    };
    if let Err(e) = windcfg_log::init(log_config) {
        eprintln!("warning: {e}");
    }

    match cli.execute() {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code().into()
        }
    }
}
