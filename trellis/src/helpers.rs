//! `yield` and `partial` template helpers
//!
//! Both are plain callables in the template namespace:
//!
//! ```jinja
//! {# layout #}
//! <body>{{ yield() }}</body>
//!
//! {# page #}
//! <ul>{% for user in users %}{{ partial("users/row", user) }}{% endfor %}</ul>
//! {{ partial("users/badge", "name", user.name, "role", "admin") }}
//! ```
//!
//! `partial("users/row", ..)` renders `users/_row.html`. Both helpers return
//! safe strings, so their output is not escaped a second time.
//!
//! A binding that is not a map (a list, a string, a number) is exposed to the
//! template under [`THIS`]:
//!
//! ```jinja
//! {{ partial("tag", "ruby") }}
//! {# _tag.html #}
//! <i>{{ this }}</i>
//! ```

use minijinja::value::{Object, Rest, ValueKind};
use minijinja::{context, Environment, Error, ErrorKind, State, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::response::HTML_FORMAT;

/// Name of the layout helper
pub const YIELD: &str = "yield";

/// Name of the partial helper
pub const PARTIAL: &str = "partial";

/// Name a non-map binding is visible under
pub const THIS: &str = "this";

/// Turn a render binding into a template context
///
/// Maps (and structs, which serialize as maps) become the context directly.
/// Any other value is wrapped as `{ this: value }`; an undefined or none
/// binding is kept, so the template sees an empty context.
#[must_use]
pub fn bind(value: Value) -> Value {
    match value.kind() {
        ValueKind::Map | ValueKind::Undefined | ValueKind::None => value,
        _ => context! { this => value },
    }
}

/// Install the built-in helpers
///
/// `yield` starts out as a placeholder that fails; a layout render replaces it
/// on its own copy of the environment.
pub fn register(env: &mut Environment<'static>) {
    env.add_function(YIELD, yield_without_layout);
    env.add_function(PARTIAL, partial);
}

fn yield_without_layout() -> Result<Value, Error> {
    Err(Error::new(
        ErrorKind::InvalidOperation,
        "yield called without layout",
    ))
}

fn partial(state: &State, name: &str, args: Rest<Value>) -> Result<Value, Error> {
    let binding = binding_from_args(&args)?;
    let rendered = state
        .env()
        .get_template(&partial_name(name))?
        .render(binding)?;
    Ok(Value::from_safe_string(rendered))
}

/// Template name a partial reference resolves to
///
/// An underscore is prefixed to the last path segment and the HTML format is
/// appended: `users/row` becomes `users/_row.html`.
#[must_use]
pub fn partial_name(name: &str) -> String {
    match name.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_{file}.{HTML_FORMAT}"),
        None => format!("_{name}.{HTML_FORMAT}"),
    }
}

/// Build a partial's binding from the trailing call arguments
///
/// A single argument is the binding, wrapped by [`bind`] unless it is a map.
/// Otherwise arguments are read as
/// `key, value` pairs where every key must be a string; no arguments give an
/// empty map.
///
/// # Errors
///
/// Fails on an odd number of arguments or a non-string key.
pub fn binding_from_args(args: &[Value]) -> Result<Value, Error> {
    if let [single] = args {
        return Ok(bind(single.clone()));
    }

    if args.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!(
                "number of parameters must be multiple of 2, got {}",
                args.len()
            ),
        ));
    }

    let mut binding = BTreeMap::new();
    for pair in args.chunks_exact(2) {
        let (key, value) = (&pair[0], &pair[1]);
        let Some(key) = key.as_str() else {
            return Err(Error::new(
                ErrorKind::InvalidOperation,
                format!(r#"pairs should be in format "string => value", got {key}, {value}"#),
            ));
        };
        binding.insert(key.to_string(), value.clone());
    }

    Ok(Value::from_serialize(&binding))
}

/// Deferred page content handed to a layout as `yield`
///
/// Calling it renders the page template with the page's binding inside
/// whatever environment the layout is running in.
#[derive(Debug)]
pub struct YieldContent {
    template: String,
    binding: Value,
}

impl YieldContent {
    /// Content that renders `template` with `binding`
    #[must_use]
    pub fn new(template: impl Into<String>, binding: Value) -> Self {
        Self {
            template: template.into(),
            binding,
        }
    }

    /// Name of the wrapped template
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Object for YieldContent {
    fn call(self: &Arc<Self>, state: &State<'_, '_>, args: &[Value]) -> Result<Value, Error> {
        if !args.is_empty() {
            return Err(Error::new(
                ErrorKind::TooManyArguments,
                "yield takes no arguments",
            ));
        }

        let rendered = state
            .env()
            .get_template(&self.template)?
            .render(&self.binding)?;
        Ok(Value::from_safe_string(rendered))
    }
}
