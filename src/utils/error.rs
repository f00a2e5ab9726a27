// Common error types for the project index server

/// Errors raised by the index service, the stores and the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Caller supplied something unusable (empty slug, missing upload)
    #[error("{0}")]
    InvalidInput(String),

    /// Filesystem access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Index could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Scraper pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EditorError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EditorError::InvalidInput(message.into())
    }

    /// Whether the failure is the caller's fault rather than the server's
    pub fn is_client_error(&self) -> bool {
        matches!(self, EditorError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
