//! Error types for spec-providers

use crate::cloud::Cloud;

/// Result type for spec-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while selecting or converting provider specs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Unknown cloud name
    #[error("Invalid cloud: {cloud}")]
    InvalidCloud { cloud: String },

    /// The registry has no provider for the cloud
    #[error("Provider not registered for cloud: {cloud}")]
    ProviderNotRegistered { cloud: Cloud },

    /// Schema or resolution error from spec-core
    #[error(transparent)]
    Spec(#[from] spec_core::Error),
}
