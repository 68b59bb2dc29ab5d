//! Default value generators
//!
//! Some defaults cannot be stored statically in a schema: resource names
//! must be unique per run and secrets must be fresh. Options reference a
//! [`DefaultGenerator`] instead, which the resolver invokes with the
//! [`RunContext`] only when no override, config value or static default
//! applies.

use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;
use rand::seq::SliceRandom;
use serde_json::Value;

use crate::context::RunContext;

/// Length of generated secrets unless a schema asks for another one
pub const DEFAULT_SECRET_LENGTH: usize = 10;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Produces a default value at resolution time.
///
/// Implementations may read the run context but must not hold any other
/// state that changes between calls, apart from randomness.
pub trait DefaultGenerator: fmt::Debug + Send + Sync {
    fn generate(&self, context: &RunContext) -> Value;
}

/// `<prefix>-<run_uri>`, identical for every resolution within one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunScopedName {
    prefix: String,
}

impl RunScopedName {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn name_for(&self, context: &RunContext) -> String {
        format!("{}-{}", self.prefix, context.run_uri())
    }
}

impl DefaultGenerator for RunScopedName {
    fn generate(&self, context: &RunContext) -> Value {
        Value::String(self.name_for(context))
    }
}

/// A fresh alphanumeric secret on every call.
///
/// Secrets of three or more characters always contain a lowercase letter,
/// an uppercase letter and a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSecret {
    length: usize,
}

impl RandomSecret {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate_secret(&self) -> String {
        let mut rng = rand::rng();
        let mut secret: Vec<u8> = Vec::with_capacity(self.length);

        if self.length >= 3 {
            for class in [LOWERCASE, UPPERCASE, DIGITS] {
                secret.push(class[rng.random_range(0..class.len())]);
            }
        }
        while secret.len() < self.length {
            secret.push(rng.sample(Alphanumeric));
        }
        secret.shuffle(&mut rng);

        secret.into_iter().map(char::from).collect()
    }
}

impl Default for RandomSecret {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_LENGTH)
    }
}

impl DefaultGenerator for RandomSecret {
    fn generate(&self, _context: &RunContext) -> Value {
        Value::String(self.generate_secret())
    }
}
