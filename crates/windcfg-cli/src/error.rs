//! CLI error handling.

use std::path::PathBuf;

use thiserror::Error;
use windcfg_config::ConfigError;

use crate::Exit;

/// CLI error type with context for the user
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no config file found in {}", dir.display())]
    NotFound { dir: PathBuf },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Wrap a config error raised while handling `path`.
    pub fn config(path: impl Into<PathBuf>, source: ConfigError) -> Self {
        Self::Config {
            path: path.into(),
            source,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::NotFound { .. } => Exit::ConfigError,
            Self::AlreadyExists { .. } => Exit::GeneralError,
            Self::Config { source, .. } => match source {
                ConfigError::ValidationError { .. } => Exit::ValidationError,
                ConfigError::ReadError { .. } => Exit::IoError,
                _ => Exit::ConfigError,
            },
            Self::Io { .. } => Exit::IoError,
            Self::Report(_) => Exit::GeneralError,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("run `windcfg init` to create tailwind.config.js"),
            Self::AlreadyExists { .. } => Some("pass --force to overwrite it"),
            Self::Config {
                source: ConfigError::ValidationError { field, .. },
                ..
            } if field == "darkMode" => Some("darkMode accepts \"media\" or \"class\""),
            Self::Config {
                source: ConfigError::ValidationError { field, .. },
                ..
            } if field.starts_with("content") => {
                Some("content lists the template globs to scan, e.g. './templates/**/*.html'")
            }
            _ => None,
        }
    }
}
