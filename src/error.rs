//! Error types for ChainSpec
//!
//! Parsing never fails on malformed markdown, so every variant here belongs to
//! rendering, configuration or the filesystem boundary.

use std::path::PathBuf;
use thiserror::Error;

/// ChainSpec error types
#[derive(Debug, Error)]
pub enum Error {
    /// The requested template name has no stored text
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Reading or writing a file (or creating a directory) failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded
    #[error("Failed to serialize contract spec: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A configuration file could not be read or parsed
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: String, message: String },
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for ChainSpec operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_names_template() {
        let err = Error::TemplateNotFound {
            name: "Missing_Template".to_string(),
        };
        assert_eq!(err.to_string(), "Template not found: Missing_Template");
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = Error::io(
            "/tmp/out/Token.sol",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out/Token.sol"));
        assert!(msg.contains("denied"));
    }
}
