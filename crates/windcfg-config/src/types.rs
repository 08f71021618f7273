//! Configuration document types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::loader::ConfigError;

/// How dark-mode variants are activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkModeStrategy {
    /// Follow the operating system preference (`prefers-color-scheme`).
    #[default]
    Media,
    /// Toggle through a `dark` class on an ancestor element.
    Class,
}

impl DarkModeStrategy {
    /// The literal used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for DarkModeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DarkModeStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "media" => Ok(Self::Media),
            "class" => Ok(Self::Class),
            other => Err(ConfigError::validation(
                "darkMode",
                format!("expected \"media\" or \"class\", found \"{other}\""),
            )),
        }
    }
}

/// A glob selecting template files to scan for class names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentPattern(String);

impl ContentPattern {
    /// Validate and wrap a glob pattern.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(ConfigError::validation(
                "content",
                "pattern must not be empty",
            ));
        }
        glob::Pattern::new(&pattern).map_err(|e| {
            ConfigError::validation("content", format!("invalid glob \"{pattern}\": {e}"))
        })?;
        Ok(Self(pattern))
    }

    /// The pattern as written in the document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Theme section: top-level overrides plus the optional `extend` layer.
///
/// Both parts are opaque to this crate; the build tool owns their schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThemeConfig {
    /// `theme.extend`, layered on top of the default design tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend: Option<Map<String, Value>>,
    /// Every other key under `theme`; replaces the matching default outright.
    #[serde(flatten)]
    pub overrides: Map<String, Value>,
}

impl ThemeConfig {
    /// A theme with an empty `extend` block and no overrides.
    pub fn extended() -> Self {
        Self {
            extend: Some(Map::new()),
            overrides: Map::new(),
        }
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut overrides) = value else {
            return Err(ConfigError::validation("theme", "expected a mapping"));
        };
        let extend = match overrides.remove("extend") {
            None => None,
            Some(Value::Object(extend)) => Some(extend),
            Some(_) => {
                return Err(ConfigError::validation("theme.extend", "expected a mapping"))
            }
        };
        Ok(Self { extend, overrides })
    }

    /// Whether neither overrides nor extensions are present.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.extend.as_ref().map_or(true, Map::is_empty)
    }
}

/// Reference to a plugin loaded by the build tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginRef {
    /// A module name, e.g. `@tailwindcss/forms`.
    Module(String),
    /// Anything else, passed through untouched.
    Inline(Value),
}

impl From<Value> for PluginRef {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Module(name),
            other => Self::Inline(other),
        }
    }
}

impl From<&str> for PluginRef {
    fn from(name: &str) -> Self {
        Self::Module(name.to_string())
    }
}

/// The framework configuration document.
///
/// Built once by the loader and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationDocument {
    #[serde(rename = "darkMode")]
    dark_mode: DarkModeStrategy,
    content: Vec<ContentPattern>,
    theme: ThemeConfig,
    plugins: Vec<PluginRef>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ConfigurationDocument {
    /// Build a document from a strategy and a set of content globs.
    pub fn new<I, S>(dark_mode: DarkModeStrategy, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let content = patterns
            .into_iter()
            .map(ContentPattern::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if content.is_empty() {
            return Err(ConfigError::validation(
                "content",
                "at least one pattern is required",
            ));
        }
        Ok(Self {
            dark_mode,
            content,
            theme: ThemeConfig::default(),
            plugins: Vec::new(),
            extra: Map::new(),
        })
    }

    /// Replace the theme section.
    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the plugin list.
    pub fn with_plugins<I>(mut self, plugins: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PluginRef>,
    {
        self.plugins = plugins.into_iter().map(Into::into).collect();
        self
    }

    pub fn dark_mode(&self) -> DarkModeStrategy {
        self.dark_mode
    }

    pub fn content(&self) -> &[ContentPattern] {
        &self.content
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    /// Options outside the four recognized keys, kept verbatim.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The build tool's native configuration object.
    pub fn to_external_format(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "darkMode".to_string(),
            Value::String(self.dark_mode.as_str().to_string()),
        );
        root.insert(
            "content".to_string(),
            Value::Array(
                self.content
                    .iter()
                    .map(|p| Value::String(p.as_str().to_string()))
                    .collect(),
            ),
        );

        let mut theme = self.theme.overrides.clone();
        if let Some(extend) = &self.theme.extend {
            theme.insert("extend".to_string(), Value::Object(extend.clone()));
        }
        root.insert("theme".to_string(), Value::Object(theme));

        root.insert(
            "plugins".to_string(),
            Value::Array(
                self.plugins
                    .iter()
                    .map(|plugin| match plugin {
                        PluginRef::Module(name) => Value::String(name.clone()),
                        PluginRef::Inline(value) => value.clone(),
                    })
                    .collect(),
            ),
        );

        for (key, value) in &self.extra {
            root.insert(key.clone(), value.clone());
        }
        Value::Object(root)
    }
}

impl Default for ConfigurationDocument {
    fn default() -> Self {
        Self {
            dark_mode: DarkModeStrategy::Class,
            content: vec![
                ContentPattern("./templates/**/*.html".to_string()),
                ContentPattern("./**/templates/**/*.html".to_string()),
            ],
            theme: ThemeConfig::extended(),
            plugins: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl TryFrom<Value> for ConfigurationDocument {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut root) = value else {
            return Err(ConfigError::validation(
                "(root)",
                "document must be a mapping of options",
            ));
        };

        let dark_mode = match root.remove("darkMode") {
            None => {
                tracing::debug!("darkMode not set, using media");
                DarkModeStrategy::Media
            }
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(ConfigError::validation(
                    "darkMode",
                    format!("expected \"media\" or \"class\", found {other}"),
                ))
            }
        };

        let content = match root.remove("content") {
            Some(Value::Array(entries)) => parse_content(entries)?,
            Some(_) => {
                return Err(ConfigError::validation(
                    "content",
                    "expected a sequence of glob patterns",
                ))
            }
            None => {
                return Err(ConfigError::validation(
                    "content",
                    "missing; at least one pattern is required",
                ))
            }
        };

        let theme = match root.remove("theme") {
            Some(value) => ThemeConfig::from_value(value)?,
            None => ThemeConfig::default(),
        };

        let plugins = match root.remove("plugins") {
            Some(Value::Array(entries)) => entries.into_iter().map(PluginRef::from).collect(),
            Some(_) => {
                return Err(ConfigError::validation("plugins", "expected a sequence"))
            }
            None => Vec::new(),
        };

        for key in root.keys() {
            tracing::warn!(option = %key, "unrecognized option passed through");
        }

        Ok(Self {
            dark_mode,
            content,
            theme,
            plugins,
            extra: root,
        })
    }
}

fn parse_content(entries: Vec<Value>) -> Result<Vec<ContentPattern>, ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::validation(
            "content",
            "at least one pattern is required",
        ));
    }

    let mut patterns: Vec<ContentPattern> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw = match entry {
            Value::String(raw) => raw,
            other => {
                return Err(ConfigError::validation(
                    format!("content[{index}]"),
                    format!("expected a string, found {other}"),
                ))
            }
        };
        let pattern = ContentPattern::parse(raw).map_err(|e| match e {
            ConfigError::ValidationError { message, .. } => {
                ConfigError::validation(format!("content[{index}]"), message)
            }
            other => other,
        })?;
        if patterns.contains(&pattern) {
            tracing::warn!(pattern = %pattern, "duplicate content pattern");
        }
        patterns.push(pattern);
    }
    Ok(patterns)
}
