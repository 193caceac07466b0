//! Renderer configuration
//!
//! Options are loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `TRELLIS_` prefix)
//! 2. `./trellis.toml` (or an explicit file via [`RenderOptions::load_from`])
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # trellis.toml
//! directory = "app/templates"
//! layout = "layouts/application"
//! extensions = [".tmpl", ".jinja"]
//! hot_reload = false
//!
//! [delimiters]
//! variable_start = "[["
//! variable_end = "]]"
//! ```
//!
//! Nested keys can be overridden from the environment with a double
//! underscore, e.g. `TRELLIS_DELIMITERS__VARIABLE_START="[["`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use minijinja::{syntax::SyntaxConfig, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, Result};

/// Directory walked when none is configured
pub const DEFAULT_DIRECTORY: &str = "templates";

/// Extension loaded when none is configured
pub const DEFAULT_EXTENSION: &str = ".tmpl";

/// Local configuration file picked up by [`RenderOptions::load`]
pub const LOCAL_CONFIG_FILE: &str = "trellis.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "TRELLIS_";

/// Template delimiters
///
/// Defaults to the usual Jinja delimiters. Any pair can be replaced, for
/// example when templates have to coexist with a client-side framework that
/// also uses `{{ }}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    /// Start of a block tag, defaults to `{%`
    pub block_start: String,
    /// End of a block tag, defaults to `%}`
    pub block_end: String,
    /// Start of a variable expression, defaults to `{{`
    pub variable_start: String,
    /// End of a variable expression, defaults to `}}`
    pub variable_end: String,
    /// Start of a comment, defaults to `{#`
    pub comment_start: String,
    /// End of a comment, defaults to `#}`
    pub comment_end: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            block_start: "{%".to_string(),
            block_end: "%}".to_string(),
            variable_start: "{{".to_string(),
            variable_end: "}}".to_string(),
            comment_start: "{#".to_string(),
            comment_end: "#}".to_string(),
        }
    }
}

impl Delimiters {
    /// Replace the variable delimiters, keeping the others
    #[must_use]
    pub fn with_variable(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.variable_start = start.into();
        self.variable_end = end.into();
        self
    }

    /// Replace the block delimiters, keeping the others
    #[must_use]
    pub fn with_block(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.block_start = start.into();
        self.block_end = end.into();
        self
    }

    /// Replace the comment delimiters, keeping the others
    #[must_use]
    pub fn with_comment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.comment_start = start.into();
        self.comment_end = end.into();
        self
    }

    /// Whether these are the stock Jinja delimiters
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Build the engine syntax configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiters are empty or ambiguous.
    pub fn to_syntax(&self) -> Result<SyntaxConfig> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(self.block_start.clone(), self.block_end.clone())
            .variable_delimiters(self.variable_start.clone(), self.variable_end.clone())
            .comment_delimiters(self.comment_start.clone(), self.comment_end.clone())
            .build()?;
        Ok(syntax)
    }
}

/// Helper callables installed into every compiled template set
///
/// Values are expected to be callable, typically created with
/// [`Value::from_function`].
#[derive(Clone, Default)]
pub struct Functions(BTreeMap<String, Value>);

impl Functions {
    /// Create an empty function map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a helper
    pub fn insert(&mut self, name: impl Into<String>, function: Value) {
        self.0.insert(name.into(), function);
    }

    /// Add or replace a helper, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, function: Value) -> Self {
        self.insert(name, function);
        self
    }

    /// Iterate over `(name, callable)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of registered helpers
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no helpers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Options for building a [`crate::Renderer`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Directory to load templates from
    pub directory: PathBuf,

    /// Layout template base name, rendered around every HTML page
    pub layout: Option<String>,

    /// File extensions to load templates from
    pub extensions: Vec<String>,

    /// Template delimiters
    pub delimiters: Delimiters,

    /// Recompile templates from disk for every copy
    pub hot_reload: bool,

    /// Helper functions added to every template
    #[serde(skip)]
    pub functions: Functions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            layout: None,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            delimiters: Delimiters::default(),
            hot_reload: cfg!(debug_assertions),
            functions: Functions::default(),
        }
    }
}

impl RenderOptions {
    /// Create options with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the layout wrapped around HTML pages
    #[must_use]
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Set the file extensions to load
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the template delimiters
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Enable or disable recompiling on every copy
    #[must_use]
    pub const fn with_hot_reload(mut self, hot_reload: bool) -> Self {
        self.hot_reload = hot_reload;
        self
    }

    /// Add a helper function available to every template
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, function: Value) -> Self {
        self.functions.insert(name, function);
        self
    }

    /// Fill empty values with defaults
    ///
    /// An empty directory falls back to `templates`, an empty extension list
    /// to `.tmpl`, and an empty layout name means no layout.
    #[must_use]
    pub fn prepare(mut self) -> Self {
        if self.directory.as_os_str().is_empty() {
            self.directory = PathBuf::from(DEFAULT_DIRECTORY);
        }
        self.extensions.retain(|ext| !ext.trim_start_matches('.').is_empty());
        if self.extensions.is_empty() {
            self.extensions = vec![DEFAULT_EXTENSION.to_string()];
        }
        if self.layout.as_deref().is_some_and(str::is_empty) {
            self.layout = None;
        }
        self
    }

    /// Load options from `./trellis.toml` and `TRELLIS_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - `./trellis.toml` exists but contains invalid TOML
    /// - Values fail type conversion
    pub fn load() -> Result<Self> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        Self::figment(local.exists().then_some(local.as_path()))?
            .extract()
            .map_err(Into::into)
    }

    /// Load options from a specific file, still honoring environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or values fail type conversion.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            let message = format!("configuration file {} not found", path.display());
            return Err(RenderError::from(figment::Error::from(message)));
        }

        Self::figment(Some(path))?.extract().map_err(Into::into)
    }

    fn figment(file: Option<&Path>) -> Result<Figment> {
        // Start with defaults (lowest priority)
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (highest priority, double underscore for nesting)
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true)))
    }
}
