//! Error types for spec-db

use std::path::PathBuf;

/// Result type for spec-db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving a database spec
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config document could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a known config format
    #[error("Unsupported config format: {path} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// Document root or component is not a mapping
    #[error("Expected a mapping at {path}, found {found}")]
    NotAMapping { path: String, found: String },

    /// Dotted component path does not exist in the document
    #[error("Component not found: {path}")]
    ComponentNotFound { path: String },

    /// Unknown database engine
    #[error("Invalid database: {database}")]
    InvalidDatabase { database: String },

    // Transparent wrappers for underlying crate errors
    /// Schema or resolution error from spec-core
    #[error(transparent)]
    Spec(#[from] spec_core::Error),

    /// Provider error from spec-providers
    #[error(transparent)]
    Provider(#[from] spec_providers::Error),

    /// JSON parse error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
