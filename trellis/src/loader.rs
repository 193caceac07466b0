//! Template discovery and compilation
//!
//! Templates are found by walking a directory tree. A file is named after its
//! path relative to the root with only the final extension removed, so
//! `templates/sessions/new.html.tmpl` is available as `sessions/new.html`.
//! Names always use `/` as separator.

use minijinja::Environment;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::RenderOptions;
use crate::error::{RenderError, Result};
use crate::helpers;

/// A template file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Lookup name, e.g. `sessions/new.html`
    pub name: String,
    /// Location of the file
    pub path: PathBuf,
}

/// A compiled set of named templates
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub(crate) env: Environment<'static>,
    names: Vec<String>,
}

impl TemplateSet {
    /// Names of all compiled templates, sorted
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a template with this exact name was compiled
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Number of compiled templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set holds no templates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The underlying environment
    #[must_use]
    pub const fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

/// Map a path relative to the template root to its lookup name
///
/// Returns `None` for paths without a file component.
#[must_use]
pub fn template_name(relative: &Path) -> Option<String> {
    let stem = relative.with_extension("");
    let segments: Vec<_> = stem
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.') == ext)
        })
}

/// Find all template files below `directory`
///
/// Files are visited in file-name order so that the result is stable across
/// platforms. Symbolic links are not followed. A missing directory holds no
/// templates.
///
/// # Errors
///
/// Returns [`RenderError::Walk`] if an existing directory cannot be traversed.
pub fn discover(directory: &Path, extensions: &[String]) -> Result<Vec<TemplateSource>> {
    let mut sources = Vec::new();

    if !directory.exists() {
        tracing::warn!(directory = %directory.display(), "Template directory does not exist");
        return Ok(sources);
    }

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !matches_extension(entry.path(), extensions) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(directory) else {
            continue;
        };

        if let Some(name) = template_name(relative) {
            sources.push(TemplateSource {
                name,
                path: entry.path().to_path_buf(),
            });
        }
    }

    Ok(sources)
}

/// Compile every template below the configured directory
///
/// User helper functions are installed first, then the built-in `yield`
/// and `partial` helpers.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked, a file cannot be
/// read, the delimiters are invalid, or a template fails to parse.
pub fn compile(options: &RenderOptions) -> Result<TemplateSet> {
    let mut env = Environment::new();

    // Syntax must be in place before any template is parsed
    if !options.delimiters.is_default() {
        env.set_syntax(options.delimiters.to_syntax()?);
    }

    let sources = discover(&options.directory, &options.extensions)?;
    let mut names = Vec::with_capacity(sources.len());

    for TemplateSource { name, path } in sources {
        let content = std::fs::read_to_string(&path)
            .map_err(|source| RenderError::Read { path: path.clone(), source })?;

        tracing::trace!(template = %name, path = %path.display(), "Loading template");
        env.add_template_owned(name.clone(), content)?;
        names.push(name);
    }

    for (name, function) in options.functions.iter() {
        env.add_global(name.to_string(), function.clone());
    }
    helpers::register(&mut env);

    names.sort();
    names.dedup();

    tracing::debug!(
        directory = %options.directory.display(),
        templates = names.len(),
        "Compiled template set"
    );

    Ok(TemplateSet { env, names })
}
