//! Error types for spec-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from spec-db
    #[error(transparent)]
    Db(#[from] spec_db::Error),

    /// Error from spec-core
    #[error(transparent)]
    Spec(#[from] spec_core::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging setup failed
    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
