//! Failure taxonomy for the ingestion pipeline
//!
//! Exactly two things can go wrong: the selected file cannot be read, or its
//! content is not valid JSON. Both are recovered at the pipeline boundary
//! and stored as values; nothing here propagates as a panic.

use std::io;

use thiserror::Error;

/// Tagged pipeline failure.
///
/// `Read` and `Parse` are mutually exclusive with a parsed document: the
/// state holder carries exactly one of document, error, or pending at any
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// I/O failure reading the selected file
    #[error("failed to read {name}: {message}")]
    Read {
        /// Display name of the file that failed
        name: String,
        /// Underlying I/O error kind
        kind: io::ErrorKind,
        /// Underlying I/O error message
        message: String,
    },
    /// Content is not valid JSON
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        /// 1-indexed line of the failure
        line: usize,
        /// 1-indexed column of the failure
        column: usize,
        /// Parser message
        message: String,
    },
}

impl PipelineError {
    /// Tag an I/O failure with the file it occurred on.
    ///
    /// The error kind and message are captured by value so the result is
    /// cloneable out of shared state.
    pub fn read(name: impl Into<String>, error: &io::Error) -> Self {
        Self::Read {
            name: name.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Tag a JSON syntax failure, keeping the parser's position.
    pub fn parse(error: &serde_json::Error) -> Self {
        Self::Parse {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = PipelineError::read("data.json", &io_err);
        assert!(err.is_read());
        assert!(!err.is_parse());
        match &err {
            PipelineError::Read { name, kind, .. } => {
                assert_eq!(name, "data.json");
                assert_eq!(*kind, io::ErrorKind::NotFound);
            }
            _ => panic!("expected Read variant"),
        }
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn test_parse_error_keeps_position() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .expect_err("input is malformed");
        let err = PipelineError::parse(&json_err);
        assert!(err.is_parse());
        match err {
            PipelineError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 0);
            }
            _ => panic!("expected Parse variant"),
        }
    }

    #[test]
    fn test_errors_are_cloneable_and_comparable() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::read("secret.json", &io_err);
        assert_eq!(err.clone(), err);
    }
}
