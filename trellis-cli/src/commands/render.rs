//! Render a template to stdout

use anyhow::{Context, Result};
use minijinja::Value;
use std::path::PathBuf;
use trellis::{RenderOptions, Renderer};

/// Render one template with an optional JSON binding
pub struct RenderCommand {
    /// Template name without format
    pub name: String,
    /// Output format, e.g. `html` or `js`
    pub format: String,
    /// Template directory override
    pub dir: Option<PathBuf>,
    /// Layout override; empty disables the layout
    pub layout: Option<String>,
    /// JSON binding
    pub data: Option<String>,
}

impl RenderCommand {
    /// Execute the command
    pub fn execute(self, options: RenderOptions) -> Result<()> {
        let output = self.render(options)?;
        println!("{output}");
        Ok(())
    }

    /// Render and return the output
    pub fn render(self, mut options: RenderOptions) -> Result<String> {
        if let Some(dir) = self.dir {
            options.directory = dir;
        }

        let binding = match self.data.as_deref() {
            Some(json) => {
                let data: serde_json::Value =
                    serde_json::from_str(json).context("--data must be valid JSON")?;
                Value::from_serialize(&data)
            }
            None => Value::from_serialize(serde_json::Map::new()),
        };

        let renderer = Renderer::new(options).context("Failed to compile templates")?;
        let mut copy = renderer.copy()?;
        if let Some(layout) = self.layout {
            copy.set_layout(layout);
        }

        copy.render_format(&self.format, &self.name, binding)
            .with_context(|| format!("Failed to render {}.{}", self.name, self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn command(dir: &std::path::Path, name: &str) -> RenderCommand {
        RenderCommand {
            name: name.to_string(),
            format: "html".to_string(),
            dir: Some(dir.to_path_buf()),
            layout: None,
            data: None,
        }
    }

    #[test]
    fn test_render_with_data_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.html.tmpl"), "<p>{{ title }}</p>").unwrap();
        fs::write(dir.path().join("layout.html.tmpl"), "<body>{{ yield() }}</body>").unwrap();

        let cmd = RenderCommand {
            layout: Some("layout".to_string()),
            data: Some(r#"{"title": "Hi"}"#.to_string()),
            ..command(dir.path(), "page")
        };

        let output = cmd.render(RenderOptions::new().with_hot_reload(false)).unwrap();
        assert_eq!(output, "<body><p>Hi</p></body>");
    }

    #[test]
    fn test_render_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.html.tmpl"), "x").unwrap();

        let cmd = RenderCommand {
            data: Some("{not json".to_string()),
            ..command(dir.path(), "page")
        };

        let err = cmd.render(RenderOptions::new()).unwrap_err();
        assert!(err.to_string().contains("valid JSON"));
    }

    #[test]
    fn test_empty_layout_disables_configured_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.html.tmpl"), "plain").unwrap();

        let cmd = RenderCommand {
            layout: Some(String::new()),
            ..command(dir.path(), "page")
        };

        let output = cmd
            .render(RenderOptions::new().with_layout("missing"))
            .unwrap();
        assert_eq!(output, "plain");
    }
}
