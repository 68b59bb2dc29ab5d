//! Override sources
//!
//! An override source reports, per flag name, the parsed value and whether
//! the user set it explicitly. Only explicitly set values take precedence
//! over the raw config; a flag that merely carries its registered default is
//! ignored by resolution.

use std::collections::HashMap;

use serde_json::Value;

/// A parsed flag value
#[derive(Debug, Clone, PartialEq)]
pub struct FlagValue {
    pub value: Value,
    pub explicitly_set: bool,
}

impl FlagValue {
    pub fn explicit(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            explicitly_set: true,
        }
    }

    pub fn default_only(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            explicitly_set: false,
        }
    }
}

/// Read-only lookup of override values by flag name
pub trait OverrideSource {
    fn get(&self, name: &str) -> Option<FlagValue>;
}

impl<T: OverrideSource + ?Sized> OverrideSource for &T {
    fn get(&self, name: &str) -> Option<FlagValue> {
        (**self).get(name)
    }
}

/// The empty override source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn get(&self, _name: &str) -> Option<FlagValue> {
        None
    }
}

/// In-memory override source keyed by flag name
///
/// # Example
///
/// ```
/// use spec_core::{FlagValues, OverrideSource};
///
/// let mut flags = FlagValues::new();
/// flags.parse("database", "postgres");
/// flags.set_default("database_version", "5.6");
///
/// assert!(flags.get("database").unwrap().explicitly_set);
/// assert!(!flags.get("database_version").unwrap().explicitly_set);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    flags: HashMap<String, FlagValue>,
}

impl FlagValues {
    pub fn new() -> Self {
        Self {
            flags: HashMap::new(),
        }
    }

    /// Record an explicitly supplied value, replacing any previous one.
    pub fn parse(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.flags.insert(name.into(), FlagValue::explicit(value));
        self
    }

    /// Register a flag's default without marking it as set.
    ///
    /// An explicit value already recorded for the flag is kept.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.flags
            .entry(name.into())
            .or_insert_with(|| FlagValue::default_only(value));
        self
    }

    pub fn is_explicitly_set(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|f| f.explicitly_set)
    }

    /// Sorted names of every registered flag
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.flags.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl OverrideSource for FlagValues {
    fn get(&self, name: &str) -> Option<FlagValue> {
        self.flags.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_marks_flag_explicit() {
        let mut flags = FlagValues::new();
        flags.parse("database", "postgres");

        assert!(flags.is_explicitly_set("database"));
        assert_eq!(
            flags.get("database"),
            Some(FlagValue::explicit("postgres"))
        );
    }

    #[test]
    fn set_default_does_not_mark_flag_explicit() {
        let mut flags = FlagValues::new();
        flags.set_default("database_version", "5.6");

        assert!(!flags.is_explicitly_set("database_version"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn set_default_keeps_explicit_value() {
        let mut flags = FlagValues::new();
        flags.parse("cloud", "AWS").set_default("cloud", "GCP");

        assert_eq!(flags.get("cloud"), Some(FlagValue::explicit("AWS")));
    }

    #[test]
    fn unknown_flag_is_absent() {
        assert_eq!(NoOverrides.get("database"), None);
        assert_eq!(FlagValues::new().get("database"), None);
        assert!(FlagValues::new().is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let mut flags = FlagValues::new();
        flags.parse("zones", "us-east1-b").parse("cloud", "GCP");
        assert_eq!(flags.names(), vec!["cloud", "zones"]);
    }
}
