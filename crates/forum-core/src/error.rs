//! Error types for forum-insight

use crate::types::PostId;
use thiserror::Error;

/// Main error type for forum-insight
#[derive(Debug, Error)]
pub enum ForumError {
    /// Caller passed an argument that can never be valid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the storage collaborator
    #[error("Storage error: {0}")]
    Storage(String),

    /// Post lookup came back empty where a post is required
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// Input rejected by the validator, converted on request
    #[error("Input rejected: {0}")]
    Rejected(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ForumError>,
    },
}

impl ForumError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ForumError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for ForumError {
    fn from(err: toml::de::Error) -> Self {
        ForumError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ForumError {
    fn from(err: toml::ser::Error) -> Self {
        ForumError::Toml(err.to_string())
    }
}

/// Result type alias for forum-insight
pub type Result<T> = std::result::Result<T, ForumError>;
