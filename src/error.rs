//! Application-wide error types and result alias.
//!
//! `TodoError` covers the two failures the store itself can report (a missing
//! todo and a rejected argument) plus the I/O and parsing failures of the
//! configuration layer.
//!
//! Every store error is recoverable: a failed call leaves the collection
//! untouched and the store usable, so callers can simply retry with corrected
//! input.

use std::io;

use crate::todo::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TodoError::InvalidArgument(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        TodoError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_the_id() {
        let err = TodoError::NotFound(TodoId::new(7));
        assert_eq!(err.to_string(), "todo not found: T7");
    }

    #[test]
    fn invalid_argument_error() {
        let err = TodoError::invalid_argument("title must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument: title must not be empty"
        );
    }

    #[test]
    fn config_error() {
        let err = TodoError::config("missing home");
        assert_eq!(err.to_string(), "Configuration error: missing home");
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TodoError = io_err.into();
        assert!(matches!(err, TodoError::Io(_)));
    }

    #[test]
    fn toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Table>("key = ").unwrap_err();
        let err: TodoError = parse_err.into();
        assert!(err.to_string().starts_with("TOML parse error: "));
    }
}
