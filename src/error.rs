//! Error types for unscroll library.
//!
//! The pagination pipeline itself is total over its inputs and never returns
//! an error. These types cover the integration boundaries: loading content,
//! validating options, and writing rendered output.

use std::io;
use thiserror::Error;

/// Result type alias for unscroll operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a pagination pass.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a document or options file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The content file parsed but does not describe a usable document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A configuration value is out of its allowed range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error while materializing pages (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOptions("min_scale must be in (0, 1]".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid options: min_scale must be in (0, 1]"
        );

        let err = Error::InvalidDocument("expected an array of nodes".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid document: expected an array of nodes"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
