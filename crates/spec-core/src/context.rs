//! Run-scoped context shared by default value generators
//!
//! A [`RunContext`] carries the identifier of one invocation of the
//! benchmarking system. It is created once at process start and only ever
//! read afterwards: generators derive run-scoped names from it, so two
//! resolutions in the same run agree on those names.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length of a run URI
pub const MAX_RUN_URI_LEN: usize = 12;

static CURRENT: OnceLock<RunContext> = OnceLock::new();

/// Identifier of a single run of the system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunContext {
    run_uri: String,
}

impl RunContext {
    /// Create a context from an explicit run URI.
    ///
    /// The URI must be non-empty, alphanumeric and at most
    /// [`MAX_RUN_URI_LEN`] characters, since it ends up embedded in
    /// provider resource names.
    pub fn new(run_uri: impl Into<String>) -> Result<Self> {
        let run_uri = run_uri.into();

        if run_uri.is_empty() {
            return Err(Error::InvalidRunUri {
                run_uri,
                reason: "must not be empty".to_string(),
            });
        }
        if !run_uri.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidRunUri {
                run_uri,
                reason: "must be alphanumeric".to_string(),
            });
        }
        if run_uri.len() > MAX_RUN_URI_LEN {
            return Err(Error::InvalidRunUri {
                run_uri,
                reason: format!("must be at most {} characters", MAX_RUN_URI_LEN),
            });
        }

        Ok(Self { run_uri })
    }

    /// Generate a fresh context from the tail of a v4 UUID.
    pub fn generate() -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let tail = &id[id.len() - 8..];
        Self {
            run_uri: tail.to_string(),
        }
    }

    /// The run URI
    pub fn run_uri(&self) -> &str {
        &self.run_uri
    }

    /// Install the process-wide context.
    ///
    /// Succeeds only for the first caller; the installed context is never
    /// replaced for the lifetime of the process.
    pub fn install(context: RunContext) -> Result<&'static RunContext> {
        let mut installed = false;
        let current = CURRENT.get_or_init(|| {
            installed = true;
            context
        });

        if !installed {
            return Err(Error::RunContextAlreadySet {
                current: current.run_uri.clone(),
            });
        }

        tracing::debug!(run_uri = %current.run_uri, "Installed run context");
        Ok(current)
    }

    /// The process-wide context, if one was installed
    pub fn current() -> Option<&'static RunContext> {
        CURRENT.get()
    }
}

impl fmt::Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.run_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_accepts_alphanumeric_uri() {
        let context = RunContext::new("123").unwrap();
        assert_eq!(context.run_uri(), "123");
        assert_eq!(context.to_string(), "123");
    }

    #[rstest]
    #[case("")]
    #[case("run-123")]
    #[case("run 1")]
    #[case("abcdefghijklm")]
    fn new_rejects_invalid_uri(#[case] uri: &str) {
        let result = RunContext::new(uri);
        assert!(
            matches!(result, Err(Error::InvalidRunUri { .. })),
            "expected InvalidRunUri for {:?}, got {:?}",
            uri,
            result
        );
    }

    #[test]
    fn generate_produces_valid_uri() {
        let context = RunContext::generate();
        assert_eq!(context.run_uri().len(), 8);
        assert!(RunContext::new(context.run_uri()).is_ok());
    }

    #[test]
    fn generate_differs_between_calls() {
        assert_ne!(RunContext::generate(), RunContext::generate());
    }

    #[test]
    fn install_is_write_once() {
        // Only test in this binary that touches the global slot
        let first = RunContext::install(RunContext::new("first").unwrap()).unwrap();
        assert_eq!(first.run_uri(), "first");

        let second = RunContext::install(RunContext::new("second").unwrap());
        assert_eq!(
            second,
            Err(Error::RunContextAlreadySet {
                current: "first".to_string()
            })
        );
        assert_eq!(RunContext::current().map(|c| c.run_uri()), Some("first"));
    }
}
