//! Check command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use serde_json::json;

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::load_document;
use crate::error::CliError;

/// Validate a config file
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Config file or project directory (defaults to the current directory)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: Option<PathBuf>,
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (path, doc) = load_document(self.path.as_deref())?;

        match ctx.format {
            OutputFormat::Json => {
                let report = json!({
                    "path": path.display().to_string(),
                    "valid": true,
                    "darkMode": doc.dark_mode().as_str(),
                    "content": doc.content().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                    "plugins": doc.plugins().len(),
                    "extraOptions": doc.extra().keys().collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text if ctx.quiet => {}
            OutputFormat::Text => {
                println!("{}: ok", path.display());
                println!("  darkMode: {}", doc.dark_mode());
                println!("  content:  {} pattern(s)", doc.content().len());
                for pattern in doc.content() {
                    println!("    {pattern}");
                }
                println!("  plugins:  {}", doc.plugins().len());
                if !doc.extra().is_empty() {
                    let keys: Vec<&str> = doc.extra().keys().map(String::as_str).collect();
                    println!("  other:    {}", keys.join(", "));
                }
            }
        }
        Ok(())
    }
}
