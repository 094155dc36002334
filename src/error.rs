//! Error types for annotation I/O

use std::fmt;

/// Errors that can occur while loading or writing annotations
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Malformed annotation text
    Parse {
        /// 1-based line number in the source
        line: usize,
        /// What went wrong on that line
        message: String,
    },

    /// Loaded data violates a documented invariant
    InvariantViolation(String),

    /// Reading or writing the underlying file or handle failed
    Io(String),

    /// Audio decoding error
    Decoding(String),
}

impl AnnotationError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        AnnotationError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnnotationError::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            AnnotationError::InvariantViolation(msg) => {
                write!(f, "Invariant violation: {}", msg)
            }
            AnnotationError::Io(msg) => write!(f, "I/O error: {}", msg),
            AnnotationError::Decoding(msg) => write!(f, "Decoding error: {}", msg),
        }
    }
}

impl std::error::Error for AnnotationError {}

impl From<std::io::Error> for AnnotationError {
    fn from(err: std::io::Error) -> Self {
        AnnotationError::Io(err.to_string())
    }
}

impl From<symphonia::core::errors::Error> for AnnotationError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        AnnotationError::Decoding(err.to_string())
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, AnnotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_error() {
        let err = AnnotationError::parse(3, "expected 3 fields, found 2");
        assert_eq!(
            err.to_string(),
            "Parse error on line 3: expected 3 fields, found 2"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: AnnotationError = io.into();
        assert!(matches!(err, AnnotationError::Io(ref msg) if msg.contains("missing.txt")));
    }
}
