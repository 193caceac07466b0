//! Process-wide default renderer
//!
//! For applications that want a single template set without threading a
//! [`Renderer`] through their state.
//!
//! ```rust,no_run
//! use axum::{http::StatusCode, response::Response};
//!
//! # fn main() -> trellis::Result<()> {
//! trellis::init(trellis::RenderOptions::new().with_layout("layout"))?;
//! # Ok(())
//! # }
//!
//! async fn index() -> Response {
//!     trellis::write_html(StatusCode::OK, "hello", minijinja::context! { counter => 5 })
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::RenderOptions;
use crate::error::{RenderError, Result};
use crate::renderer::{Renderer, TemplateCopy};

static DEFAULT_RENDERER: RwLock<Option<Renderer>> = RwLock::new(None);

/// Compile templates and install them as the default renderer
///
/// Calling it again replaces the previous renderer.
///
/// # Errors
///
/// Returns error if the templates fail to compile; the previous renderer,
/// if any, stays installed.
pub fn init(options: RenderOptions) -> Result<()> {
    let renderer = Renderer::new(options)?;
    *DEFAULT_RENDERER.write() = Some(renderer);
    Ok(())
}

/// The default renderer
///
/// # Errors
///
/// Returns [`RenderError::NotInitialized`] before [`init`] succeeded.
pub fn default_renderer() -> Result<Renderer> {
    DEFAULT_RENDERER
        .read()
        .clone()
        .ok_or(RenderError::NotInitialized)
}

/// Copy of the default renderer's templates
///
/// # Errors
///
/// Returns error before [`init`] or if a hot-reload recompile fails.
pub fn copy() -> Result<TemplateCopy> {
    default_renderer()?.copy()
}

/// Render an HTML template with the default renderer
///
/// # Errors
///
/// Returns error before [`init`] or if rendering fails.
pub fn html<S: Serialize>(name: &str, binding: S) -> Result<String> {
    copy()?.html(name, binding)
}

/// Render a JavaScript template with the default renderer
///
/// # Errors
///
/// Returns error before [`init`] or if rendering fails.
pub fn js<S: Serialize>(name: &str, binding: S) -> Result<String> {
    copy()?.js(name, binding)
}

/// Render an HTML template with the default renderer into a response
pub fn write_html<S: Serialize>(status: StatusCode, name: &str, binding: S) -> Response {
    match copy() {
        Ok(mut copy) => copy.write_html(status, name, binding),
        Err(err) => err.into_response(),
    }
}

/// Render a JavaScript template with the default renderer into a response
pub fn write_js<S: Serialize>(status: StatusCode, name: &str, binding: S) -> Response {
    match copy() {
        Ok(mut copy) => copy.write_js(status, name, binding),
        Err(err) => err.into_response(),
    }
}
