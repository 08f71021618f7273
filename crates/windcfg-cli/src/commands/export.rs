//! Export command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use windcfg_config::render;

use crate::cli::CommandContext;
use crate::commands::{load_document, Syntax};
use crate::error::CliError;

/// Print a config in the build tool's format
#[derive(Debug, Parser)]
pub struct ExportCommand {
    /// Config file or project directory (defaults to the current directory)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: Option<PathBuf>,

    /// Target syntax
    #[arg(long, value_enum, default_value = "json")]
    pub to: Syntax,

    /// Write to a file instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        let (path, doc) = load_document(self.path.as_deref())?;
        let rendered = render(&doc, self.to.into()).map_err(|e| CliError::config(&path, e))?;

        match &self.output {
            Some(out) => {
                std::fs::write(out, rendered).map_err(|e| {
                    CliError::io(format!("cannot write {}", out.display()), e)
                })?;
                tracing::info!(from = %path.display(), to = %out.display(), "exported config");
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}
