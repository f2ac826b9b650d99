//! Error types for pdfmark.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
///
/// Every variant is terminal: structure inference itself never fails, so
/// these only surface at the input and output boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// The source could not be opened or parsed.
    #[error("Cannot read input: {0}")]
    InputUnreadable(String),

    /// The source yielded no extractable text fragments.
    #[error("Document contains no extractable text")]
    EmptyDocument,

    /// The destination could not be written.
    #[error("Cannot write output to {}: {source}", path.display())]
    OutputWriteFailure {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error while serializing the structure dump.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an output error for `path`.
    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::InputUnreadable(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => {
                Error::InputUnreadable("document is encrypted".to_string())
            }
            _ => Error::InputUnreadable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(err.to_string(), "Document contains no extractable text");

        let err = Error::InputUnreadable("bad xref".to_string());
        assert_eq!(err.to_string(), "Cannot read input: bad xref");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::InputUnreadable(_)));
    }

    #[test]
    fn test_output_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::output("/tmp/out.md", io_err);
        assert!(err.to_string().contains("/tmp/out.md"));
        assert!(err.to_string().contains("denied"));
    }
}
