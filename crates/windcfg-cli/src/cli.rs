//! CLI argument definitions using clap derive macros.

use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{CheckCommand, ExportCommand, InitCommand};
use crate::error::CliError;

/// windcfg - load, check and export utility-CSS framework configs
#[derive(Debug, Parser)]
#[command(
    name = "windcfg",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for reports
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a config file
    Check(CheckCommand),

    /// Print a config in the build tool's format
    Export(ExportCommand),

    /// Write a starter config
    #[command(visible_alias = "new")]
    Init(InitCommand),
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Cli {
    /// Execute the selected command
    pub fn execute(&self) -> Result<(), CliError> {
        let ctx = CommandContext {
            format: self.format,
            quiet: self.quiet,
        };

        match &self.command {
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Export(cmd) => cmd.execute(&ctx),
            Command::Init(cmd) => cmd.execute(&ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_flags() {
        let cli = Cli::try_parse_from(["windcfg", "-vv", "export", "cfg.js", "--to", "yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Export(cmd) => {
                assert_eq!(cmd.path.unwrap().to_str(), Some("cfg.js"));
                assert_eq!(cmd.to, crate::commands::Syntax::Yaml);
                assert!(cmd.output.is_none());
            }
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["windcfg", "-q", "-v", "check"]).is_err());
    }
}
