//! Error types and error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = RenderError> = std::result::Result<T, E>;

/// Errors raised while compiling or rendering templates
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template directory could not be walked
    #[error("failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A template file could not be read
    #[error("failed to read template '{}': {source}", .path.display())]
    Read {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Compiling or executing a template failed
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Renderer configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Default configuration could not be serialized
    #[error("configuration error: {0}")]
    ConfigDefaults(#[from] toml::ser::Error),

    /// The process-wide renderer was used before `trellis::init`
    #[error("default renderer is not initialized, call trellis::init first")]
    NotInitialized,
}

impl From<figment::Error> for RenderError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Template rendering error");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_message() {
        let err = RenderError::NotInitialized;
        assert!(err.to_string().contains("trellis::init"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = RenderError::Read {
            path: PathBuf::from("templates/broken.html.tmpl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let message = err.to_string();
        assert!(message.contains("templates/broken.html.tmpl"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_error_into_response_is_500() {
        let response = RenderError::NotInitialized.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
