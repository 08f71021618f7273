//! Configuration document for a utility-first CSS framework.
//!
//! Loads `tailwind.config.{js,cjs,mjs,json,yaml,yml}`, validates the dark-mode
//! strategy and content globs, and hands the document back in the shape the
//! build tool consumes. Theme and plugin entries are passed through as-is.

pub mod external;
pub mod loader;
pub mod source;
pub mod types;

#[cfg(test)]
mod integration_test;

pub use external::{render, render_js, JS_TYPE_HEADER};
pub use loader::{load, load_str, ConfigError, ConfigLoader, CANDIDATE_FILES};
pub use source::SourceFormat;
pub use types::{
    ConfigurationDocument, ContentPattern, DarkModeStrategy, PluginRef, ThemeConfig,
};
