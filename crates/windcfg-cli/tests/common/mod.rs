//! Common test utilities for CLI testing.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write a config file into the project directory
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.path().join(name), contents).expect("Failed to write config");
        self
    }

    /// Write the stock JavaScript config
    pub fn with_default_config(self) -> Self {
        self.with_file(
            "tailwind.config.js",
            r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  darkMode: 'class', // ✅ important!
  content: [

    './templates/**/*.html',
    './**/templates/**/*.html',
  ],
  theme: {
    extend: {},
  },
  plugins: [],
}
"#,
        )
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Create a command running inside the project directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("windcfg").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("WINDCFG_LOG_LEVEL")
            .env_remove("WINDCFG_LOG_FILE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
