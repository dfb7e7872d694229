//! Error types for content loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::CarouselConfigBuilderError;

/// Errors that can occur while loading certificate content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Content file not found.
    #[error("Content file not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// File extension is not a supported content format.
    #[error("Unsupported content format: {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// A certificate failed validation.
    #[error("Invalid certificate {id}: {reason}")]
    Invalid { id: String, reason: String },

    /// Two certificates share the same key.
    #[error("Duplicate certificate id: {id}")]
    DuplicateId { id: String },

    /// The background loader stopped before producing a result.
    #[error("Loading {source_name} failed: {message}")]
    Task { source_name: String, message: String },
}

impl ContentError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a parse error with path context.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Errors raised by carousel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<CarouselConfigBuilderError> for ConfigError {
    fn from(err: CarouselConfigBuilderError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_io_not_found() {
        let err = ContentError::io(
            "/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ContentError::NotFound { .. }));
        assert!(err.to_string().contains("/missing.json"));
    }

    #[test]
    fn test_content_error_io_other() {
        let err = ContentError::io(
            "/denied.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn test_task_error_names_source() {
        let err = ContentError::Task {
            source_name: "built-in certificates".to_string(),
            message: "task panicked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Loading built-in certificates failed: task panicked"
        );
    }
}
