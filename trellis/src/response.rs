//! Response helpers for rendered templates

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use mime::Mime;

/// Format whose renders are wrapped in the layout
pub const HTML_FORMAT: &str = "html";

/// Format used for JavaScript responses
pub const JS_FORMAT: &str = "js";

/// Content type for a template format
///
/// Unknown formats are served as plain text.
#[must_use]
pub fn content_type_for(format: &str) -> Mime {
    match format {
        HTML_FORMAT => mime::TEXT_HTML_UTF_8,
        JS_FORMAT => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "json" => mime::APPLICATION_JSON,
        "css" => mime::TEXT_CSS_UTF_8,
        "xml" => mime::TEXT_XML,
        _ => mime::TEXT_PLAIN_UTF_8,
    }
}

/// A rendered template ready to be sent
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Response status
    pub status: StatusCode,
    /// `Content-Type` header value
    pub content_type: Mime,
    /// Rendered body
    pub body: String,
}

impl Rendered {
    /// Wrap a rendered body
    #[must_use]
    pub const fn new(status: StatusCode, content_type: Mime, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Wrap a body rendered in the given format
    #[must_use]
    pub fn for_format(status: StatusCode, format: &str, body: String) -> Self {
        Self::new(status, content_type_for(format), body)
    }
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type.to_string())],
            self.body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(
            content_type_for("html").as_ref(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            content_type_for("js").as_ref(),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(
            content_type_for("txt").as_ref(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_rendered_into_response() {
        let response =
            Rendered::for_format(StatusCode::CREATED, HTML_FORMAT, "<p>hi</p>".to_string())
                .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
