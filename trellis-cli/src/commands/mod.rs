//! CLI command implementations

pub mod list;
pub mod render;

pub use list::ListCommand;
pub use render::RenderCommand;

use anyhow::{Context, Result};
use std::path::Path;
use trellis::RenderOptions;

/// Load renderer options, from an explicit file if given
///
/// Hot reload is always off: a CLI run compiles once.
pub fn load_options(config: Option<&Path>) -> Result<RenderOptions> {
    let options = match config {
        Some(path) => RenderOptions::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => RenderOptions::load().context("Failed to load configuration")?,
    };

    Ok(options.with_hot_reload(false))
}
