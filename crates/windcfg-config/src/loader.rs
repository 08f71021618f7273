//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::external::render;
use crate::source::{parse_source, SourceFormat};
use crate::types::ConfigurationDocument;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid syntax at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to serialize config: {message}")]
    SerializeError { message: String },
}

impl ConfigError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// File names probed by [`ConfigLoader::discover`], in priority order.
pub const CANDIDATE_FILES: [&str; 6] = [
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.json",
    "tailwind.config.yaml",
    "tailwind.config.yml",
];

/// Load and validate a configuration document from `path`.
///
/// The syntax is picked from the file extension, see [`SourceFormat::from_path`].
pub fn load(path: impl AsRef<Path>) -> Result<ConfigurationDocument, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let format = SourceFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "loading config");
    load_str(&contents, format)
}

/// Parse and validate an in-memory document.
pub fn load_str(contents: &str, format: SourceFormat) -> Result<ConfigurationDocument, ConfigError> {
    let value = parse_source(contents, format)?;
    ConfigurationDocument::try_from(value)
}

/// Configuration loader bound to a project directory.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// First existing config file in the project directory.
    pub fn discover(&self) -> Option<PathBuf> {
        CANDIDATE_FILES
            .iter()
            .map(|name| self.base_path.join(name))
            .find(|path| path.is_file())
    }

    /// Load the discovered config file.
    pub fn load(&self) -> Result<ConfigurationDocument, ConfigError> {
        match self.discover() {
            Some(path) => load(path),
            None => Err(ConfigError::NotFound {
                path: self.base_path.join(CANDIDATE_FILES[0]),
            }),
        }
    }

    /// Path a document of the given format is saved to.
    pub fn target_path(&self, format: SourceFormat) -> PathBuf {
        self.base_path
            .join(format!("tailwind.config.{}", format.extension()))
    }

    /// Save configuration to `tailwind.config.<ext>`, returning the written path.
    pub fn save(
        &self,
        config: &ConfigurationDocument,
        format: SourceFormat,
    ) -> Result<PathBuf, ConfigError> {
        std::fs::create_dir_all(&self.base_path)?;

        let path = self.target_path(format);
        let rendered = render(config, format)?;
        std::fs::write(&path, rendered)?;
        tracing::info!(path = %path.display(), "config written");
        Ok(path)
    }
}
