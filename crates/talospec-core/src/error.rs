//! Error types for the talospec core library
//!
//! Failures to read or parse a document are kept distinct from validation
//! failures: the former carry the file path and the underlying source error,
//! the latter carry a structured violation rendered by the error formatter.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

pub use crate::validation::ValidationError;

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for loading cluster specifications.
#[derive(Error, Debug)]
pub enum Error {
    /// The document could not be read
    #[error("Failed to read cluster spec '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML
    #[error("Failed to parse cluster spec '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The parsed document could not be represented as JSON values
    /// (e.g. non-string mapping keys)
    #[error("Failed to convert cluster spec '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document is readable but violates the cluster spec contract
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    pub(crate) fn io_error(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    pub(crate) fn yaml_error(path: PathBuf, source: serde_yaml::Error) -> Self {
        Self::Yaml { path, source }
    }

    pub(crate) fn json_error(path: PathBuf, source: serde_json::Error) -> Self {
        Self::Json { path, source }
    }

    /// Path of the document associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Yaml { path, .. } => Some(path),
            Self::Json { path, .. } => Some(path),
            Self::Validation(_) => None,
        }
    }

    /// Whether this is a validation failure rather than an unreadable or
    /// unparsable document.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let error = Error::io_error(
            PathBuf::from("cluster.yaml"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(error.path(), Some(&PathBuf::from("cluster.yaml")));
        assert!(!error.is_validation());
        assert!(error.to_string().contains("cluster.yaml"));
    }

    #[test]
    fn test_yaml_error_carries_path() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("{").unwrap_err();
        let error = Error::yaml_error(PathBuf::from("broken.yaml"), source);
        assert_eq!(error.path(), Some(&PathBuf::from("broken.yaml")));
        assert!(error.to_string().starts_with("Failed to parse cluster spec"));
    }
}
