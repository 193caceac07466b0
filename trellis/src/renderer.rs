//! Shared template set and per-request copies
//!
//! A [`Renderer`] owns the compiled templates. Handlers never render from it
//! directly; they take a [`TemplateCopy`], which carries its own environment.
//! Installing `yield`, switching the layout, or adding helpers on a copy never
//! touches the shared set or any other copy.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use minijinja::{Environment, Value};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{Functions, RenderOptions};
use crate::error::{RenderError, Result};
use crate::helpers::{self, YieldContent, YIELD};
use crate::loader::{self, TemplateSet};
use crate::response::{Rendered, HTML_FORMAT, JS_FORMAT};

/// Thread-safe owner of a compiled template set
///
/// Cloning is cheap; all clones share the same set. Use it directly as axum
/// state, or expose it through [`FromRef`] from a larger state type.
///
/// # Example
///
/// ```rust,no_run
/// use trellis::{RenderOptions, Renderer};
///
/// # fn example() -> trellis::Result<()> {
/// let renderer = Renderer::new(
///     RenderOptions::new()
///         .with_directory("app/templates")
///         .with_layout("layout"),
/// )?;
///
/// let html = renderer.copy()?.html("sessions/new", minijinja::context! { hello => "world" })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    set: Arc<RwLock<TemplateSet>>,
    options: Arc<RenderOptions>,
}

impl Renderer {
    /// Compile all templates found under the configured directory
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be walked or a template fails to
    /// load or parse.
    pub fn new(options: RenderOptions) -> Result<Self> {
        let options = options.prepare();
        let set = loader::compile(&options)?;

        Ok(Self {
            set: Arc::new(RwLock::new(set)),
            options: Arc::new(options),
        })
    }

    /// Take a private copy of the templates for one render
    ///
    /// With `hot_reload` enabled the copy is compiled fresh from disk, so
    /// edits show up on the next request. The fresh set also replaces the
    /// shared one, so [`Renderer::template_names`] and
    /// [`Renderer::has_template`] describe what the copy renders.
    ///
    /// # Errors
    ///
    /// Returns error only when recompiling in `hot_reload` mode fails.
    pub fn copy(&self) -> Result<TemplateCopy> {
        let env = if self.options.hot_reload {
            let set = loader::compile(&self.options)?;
            let env = set.env.clone();
            // Keep template_names/has_template in step with what was rendered
            *self.set.write() = set;
            env
        } else {
            self.set.read().env.clone()
        };

        Ok(TemplateCopy {
            env,
            layout: self.options.layout.clone(),
        })
    }

    /// Recompile from disk and swap the shared set
    ///
    /// The current set stays in place if compiling fails.
    ///
    /// # Errors
    ///
    /// Returns error if templates cannot be reloaded.
    pub fn reload(&self) -> Result<()> {
        let set = loader::compile(&self.options)?;

        // Atomic swap
        *self.set.write() = set;

        tracing::debug!("Templates reloaded");
        Ok(())
    }

    /// Names of all templates in the shared set, sorted
    #[must_use]
    pub fn template_names(&self) -> Vec<String> {
        self.set.read().names().to_vec()
    }

    /// Whether the shared set has a template with this exact name
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.set.read().contains(name)
    }

    /// Options the renderer was built with, after defaults were applied
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

/// A request-scoped copy of the templates with all rendering methods
#[derive(Debug, Clone)]
pub struct TemplateCopy {
    env: Environment<'static>,
    layout: Option<String>,
}

impl TemplateCopy {
    /// Render `name.format`
    ///
    /// HTML renders are wrapped in the layout when one is set: the layout
    /// template `layout.html` is rendered and its `yield()` produces the page.
    /// A binding that does not serialize as a map is visible as `this`.
    ///
    /// # Errors
    ///
    /// Returns error if a template is missing or fails while rendering.
    pub fn render_format<S: Serialize>(
        &mut self,
        format: &str,
        name: &str,
        binding: S,
    ) -> Result<String> {
        let binding = helpers::bind(Value::from_serialize(binding));
        let mut template = format!("{name}.{format}");

        if let (HTML_FORMAT, Some(layout)) = (format, self.layout.as_deref()) {
            let content = YieldContent::new(template, binding.clone());
            template = format!("{layout}.{HTML_FORMAT}");
            self.env.add_global(YIELD, Value::from_object(content));
        }

        let rendered = self.env.get_template(&template)?.render(binding)?;
        Ok(rendered)
    }

    /// Render an HTML template, with layout support
    ///
    /// # Errors
    ///
    /// Returns error if a template is missing or fails while rendering.
    pub fn html<S: Serialize>(&mut self, name: &str, binding: S) -> Result<String> {
        self.render_format(HTML_FORMAT, name, binding)
    }

    /// Render a JavaScript template; layouts never apply
    ///
    /// # Errors
    ///
    /// Returns error if the template is missing or fails while rendering.
    pub fn js<S: Serialize>(&mut self, name: &str, binding: S) -> Result<String> {
        self.render_format(JS_FORMAT, name, binding)
    }

    /// Render `name.format` into a response with the matching content type
    ///
    /// Failures become a `500` carrying the error text.
    pub fn write_format<S: Serialize>(
        &mut self,
        status: StatusCode,
        format: &str,
        name: &str,
        binding: S,
    ) -> Response {
        match self.render_format(format, name, binding) {
            Ok(body) => Rendered::for_format(status, format, body).into_response(),
            Err(err) => err.into_response(),
        }
    }

    /// Render an HTML template into a response
    pub fn write_html<S: Serialize>(&mut self, status: StatusCode, name: &str, binding: S) -> Response {
        self.write_format(status, HTML_FORMAT, name, binding)
    }

    /// Render a JavaScript template into a response
    pub fn write_js<S: Serialize>(&mut self, status: StatusCode, name: &str, binding: S) -> Response {
        self.write_format(status, JS_FORMAT, name, binding)
    }

    /// Override the layout for this copy; an empty name disables it
    pub fn set_layout(&mut self, layout: impl Into<String>) -> &mut Self {
        let layout = layout.into();
        self.layout = (!layout.is_empty()).then_some(layout);
        self
    }

    /// Render without a layout from now on
    pub fn without_layout(&mut self) -> &mut Self {
        self.layout = None;
        self
    }

    /// Layout currently applied to HTML renders
    #[must_use]
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// Add helper functions to this copy only
    pub fn set_funcs(&mut self, functions: &Functions) -> &mut Self {
        for (name, function) in functions.iter() {
            self.env.add_global(name.to_string(), function.clone());
        }
        self
    }

    /// Add a global value or callable to this copy only
    pub fn add_global(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let (name, value): (String, Value) = (name.into(), value.into());
        self.env.add_global(name, value);
        self
    }

    /// Whether this copy can render a template with this exact name
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

impl<S> FromRequestParts<S> for TemplateCopy
where
    Renderer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RenderError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Renderer::from_ref(state).copy()
    }
}
