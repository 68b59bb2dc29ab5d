//! Error types for spec-core

use std::fmt;

/// Result type for spec-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a supplied value was rejected for an option
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReason {
    /// The value does not have the option's declared kind
    WrongKind { expected: String },

    /// The value is outside the option's permitted set
    NotAllowed { allowed: Vec<String> },

    /// A numeric value is outside the option's inclusive bounds
    OutOfRange { min: Option<f64>, max: Option<f64> },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::WrongKind { expected } => write!(f, "expected {}", expected),
            InvalidReason::NotAllowed { allowed } => {
                write!(f, "must be one of [{}]", allowed.join(", "))
            }
            InvalidReason::OutOfRange { min, max } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "must be between {} and {}", min, max),
                (Some(min), None) => write!(f, "must be at least {}", min),
                (None, Some(max)) => write!(f, "must be at most {}", max),
                (None, None) => write!(f, "is out of range"),
            },
        }
    }
}

/// Errors that can occur while declaring schemas or resolving specs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required option had no override, no config value and no default
    #[error("Missing required option: {option}{}", required_by_suffix(.required_by))]
    MissingRequiredOption {
        option: String,
        required_by: Option<String>,
    },

    /// A supplied value failed the kind check, the permitted set or the bounds
    #[error("Invalid value {value} for option {option}: {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: InvalidReason,
    },

    /// Raw config contained keys the schema does not declare
    #[error("Unknown option(s) in {component}: {}", .keys.join(", "))]
    UnknownOption {
        component: String,
        keys: Vec<String>,
    },

    /// A discriminator resolved to a value with no matching branch
    #[error(
        "Unsupported value {value} for {discriminator}; supported values are [{}]",
        .supported.join(", ")
    )]
    UnsupportedDiscriminatorValue {
        discriminator: String,
        value: String,
        supported: Vec<String>,
    },

    /// A schema declaration violates a structural invariant
    #[error("Invalid schema {schema}: {reason}")]
    InvalidSchema { schema: String, reason: String },

    /// A resolved option does not hold the kind a typed record expects
    #[error("Option {option} does not hold a {expected} value")]
    FieldType { option: String, expected: String },

    /// A run URI failed validation
    #[error("Invalid run URI {run_uri:?}: {reason}")]
    InvalidRunUri { run_uri: String, reason: String },

    /// The process-wide run context was already installed
    #[error("Run context already set to {current:?}")]
    RunContextAlreadySet { current: String },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    match required_by {
        Some(other) => format!(" (required when {} is set)", other),
        None => String::new(),
    }
}
