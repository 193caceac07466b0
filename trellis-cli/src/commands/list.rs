//! List discovered templates

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use trellis::{RenderOptions, Renderer};

/// Print every template name the renderer would compile
pub struct ListCommand {
    options: RenderOptions,
}

impl ListCommand {
    /// Create a new command instance, applying command line overrides
    pub fn new(mut options: RenderOptions, dir: Option<PathBuf>, extensions: Vec<String>) -> Self {
        if let Some(dir) = dir {
            options.directory = dir;
        }
        if !extensions.is_empty() {
            options.extensions = extensions;
        }
        Self { options }
    }

    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let names = self.names()?;
        let directory = self.options.directory;
        for name in &names {
            println!("{}", Self::styled(name));
        }

        println!();
        println!(
            "{} {} in {}",
            style(names.len()).green().bold(),
            if names.len() == 1 { "template" } else { "templates" },
            style(directory.display()).cyan()
        );

        Ok(())
    }

    /// Compile the templates and return their names, sorted
    fn names(&self) -> Result<Vec<String>> {
        let renderer = Renderer::new(self.options.clone()).with_context(|| {
            format!(
                "Failed to compile templates in {}",
                self.options.directory.display()
            )
        })?;

        Ok(renderer.template_names())
    }

    fn is_partial(name: &str) -> bool {
        name.rsplit('/')
            .next()
            .is_some_and(|file| file.starts_with('_'))
    }

    /// Partials are dimmed so pages stand out
    fn styled(name: &str) -> String {
        if Self::is_partial(name) {
            style(name).dim().to_string()
        } else {
            style(name).bold().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_overrides_replace_configured_values() {
        let options = RenderOptions::new()
            .with_directory("app/views")
            .with_extensions([".jinja"]);

        let cmd = ListCommand::new(options.clone(), Some(PathBuf::from("other")), Vec::new());
        assert_eq!(cmd.options.directory, PathBuf::from("other"));
        assert_eq!(cmd.options.extensions, vec![".jinja".to_string()]);

        let cmd = ListCommand::new(options, None, vec![".tmpl".to_string()]);
        assert_eq!(cmd.options.directory, PathBuf::from("app/views"));
        assert_eq!(cmd.options.extensions, vec![".tmpl".to_string()]);
    }

    #[test]
    fn test_names_lists_matching_templates() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("users")).unwrap();
        fs::write(dir.path().join("users/_row.html.tmpl"), "row").unwrap();
        fs::write(dir.path().join("users/index.html.tmpl"), "index").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let cmd = ListCommand::new(
            RenderOptions::new().with_hot_reload(false),
            Some(dir.path().to_path_buf()),
            Vec::new(),
        );

        assert_eq!(cmd.names().unwrap(), vec!["users/_row.html", "users/index.html"]);
    }

    #[test]
    fn test_names_reports_broken_templates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.html.tmpl"), "{% if %}").unwrap();

        let cmd = ListCommand::new(RenderOptions::new(), Some(dir.path().to_path_buf()), Vec::new());

        let err = cmd.names().unwrap_err();
        assert!(err.to_string().contains("Failed to compile templates"));
    }

    #[test]
    fn test_is_partial() {
        assert!(ListCommand::is_partial("users/_row.html"));
        assert!(ListCommand::is_partial("_flash.html"));
        assert!(!ListCommand::is_partial("users/index.html"));
        assert!(!ListCommand::is_partial("under_score.html"));
    }
}
