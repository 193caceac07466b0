//! trellis: directory-driven templates with layouts and partials
//!
//! Point a [`Renderer`] at a directory and every template file below it
//! becomes renderable by name. Files follow a
//! `path/filename.{format}.{extension}` scheme: with the default `.tmpl`
//! extension, `templates/sessions/new.html.tmpl` is rendered as
//! `sessions/new` in the `html` format.
//!
//! Rendering always happens on a [`TemplateCopy`], so per-request changes
//! (the layout's `yield`, helper functions, a different layout) never leak
//! into the shared template set.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::{http::StatusCode, response::Response, routing::get, Router};
//! use trellis::{RenderOptions, Renderer, TemplateCopy};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let renderer = Renderer::new(RenderOptions::new().with_layout("layout"))?;
//!
//!     let app = Router::new().route("/", get(index)).with_state(renderer);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//!
//! async fn index(mut templates: TemplateCopy) -> Response {
//!     templates.write_html(StatusCode::OK, "hello", minijinja::context! { counter => 5 })
//! }
//! ```
//!
//! # Layouts and partials
//!
//! A layout calls `{{ yield() }}` where the page goes. Any template can call
//! `{{ partial("users/row", user) }}` to render `users/_row.html`, either with
//! a single value as binding or with `key, value` pairs.
//!
//! A page or partial binding that is not a map, such as a list or a string,
//! is available inside the template as `this`.

pub mod config;
pub mod error;
pub mod global;
pub mod helpers;
pub mod loader;
pub mod observability;
pub mod renderer;
pub mod response;

pub use config::{Delimiters, Functions, RenderOptions};
pub use error::{RenderError, Result};
pub use global::{copy, default_renderer, html, init, js, write_html, write_js};
pub use loader::{TemplateSet, TemplateSource};
pub use renderer::{Renderer, TemplateCopy};
pub use response::{content_type_for, Rendered, HTML_FORMAT, JS_FORMAT};

pub mod prelude {
    //! Convenience re-exports for common types
    //!
    //! ```rust
    //! use trellis::prelude::*;
    //! ```

    pub use crate::config::{Delimiters, Functions, RenderOptions};
    pub use crate::error::{RenderError, Result};
    pub use crate::renderer::{Renderer, TemplateCopy};
    pub use crate::response::Rendered;
    pub use minijinja::{context, Value};
}
