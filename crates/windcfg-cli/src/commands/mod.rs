//! Command implementations.

use std::path::{Path, PathBuf};

use windcfg_config::{ConfigLoader, ConfigurationDocument, SourceFormat};

use crate::error::CliError;

mod check;
mod export;
mod init;

pub use check::CheckCommand;
pub use export::ExportCommand;
pub use init::InitCommand;

/// Config syntax accepted by `--to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Syntax {
    Json,
    Yaml,
    Js,
}

impl From<Syntax> for SourceFormat {
    fn from(syntax: Syntax) -> Self {
        match syntax {
            Syntax::Json => SourceFormat::Json,
            Syntax::Yaml => SourceFormat::Yaml,
            Syntax::Js => SourceFormat::JavaScript,
        }
    }
}

/// Resolve `path` (a file, a project directory, or nothing for the current
/// directory) and load the document it points at.
pub(crate) fn load_document(
    path: Option<&Path>,
) -> Result<(PathBuf, ConfigurationDocument), CliError> {
    let file = match path {
        Some(p) if !p.is_dir() => p.to_path_buf(),
        Some(dir) => discover(ConfigLoader::new(dir), dir)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| CliError::io("cannot read current directory", e))?;
            discover(ConfigLoader::new(&cwd), &cwd)?
        }
    };

    tracing::debug!(path = %file.display(), "resolved config file");
    let doc = windcfg_config::load(&file).map_err(|e| CliError::config(&file, e))?;
    Ok((file, doc))
}

fn discover(loader: ConfigLoader, dir: &Path) -> Result<PathBuf, CliError> {
    loader.discover().ok_or_else(|| CliError::NotFound {
        dir: dir.to_path_buf(),
    })
}
