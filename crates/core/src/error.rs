//! Error types for askdocs.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, the embedding and
//! chat-completion services, and the on-disk corpus artifacts.

use thiserror::Error;

/// Unified error type for askdocs.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic in library code; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding service errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Chat-completion service errors
    #[error("Completion error: {0}")]
    Completion(String),

    /// The chat-completion service answered without any choices
    #[error("completion response contained no choices")]
    EmptyCompletion,

    /// Vector index errors
    #[error("Index error: {0}")]
    Index(String),

    /// Chunk-mapping file errors
    #[error("Chunk store error: {0}")]
    ChunkStore(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Index("table missing".to_string());
        assert_eq!(err.to_string(), "Index error: table missing");

        let err = AppError::EmptyCompletion;
        assert_eq!(err.to_string(), "completion response contained no choices");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
