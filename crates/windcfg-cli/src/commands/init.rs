//! Init command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use windcfg_config::{ConfigLoader, ConfigurationDocument};

use crate::cli::CommandContext;
use crate::commands::Syntax;
use crate::error::CliError;

/// Write a starter config
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Project directory
    #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Syntax of the generated file
    #[arg(long, value_enum, default_value = "js")]
    pub to: Syntax,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let loader = ConfigLoader::new(&self.dir);
        let target = loader.target_path(self.to.into());
        if target.exists() && !self.force {
            return Err(CliError::AlreadyExists { path: target });
        }

        let path = loader
            .save(&ConfigurationDocument::default(), self.to.into())
            .map_err(|e| CliError::config(&target, e))?;
        if !ctx.quiet {
            println!("Created {}", path.display());
        }
        Ok(())
    }
}
