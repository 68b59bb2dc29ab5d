//! Resolved specs and typed records
//!
//! [`ResolvedSpec`] is the immutable output of one resolution: one
//! [`ResolvedValue`] per declared option, in declaration order. Options
//! that were neither configured nor defaulted hold [`ResolvedValue::Unset`]
//! rather than a zero value, so "not configured" stays distinguishable from
//! "configured to false".
//!
//! Consumers normally convert a resolved spec into a hand-declared typed
//! record through [`SpecRecord`].

use serde_json::{Map, Value};

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::overrides::OverrideSource;
use crate::resolve::resolve;
use crate::schema::SpecSchema;

/// Final value of one option
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Unset,
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Spec(VariantSpec),
}

impl ResolvedValue {
    pub fn is_set(&self) -> bool {
        !matches!(self, ResolvedValue::Unset)
    }

    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::Unset => Value::Null,
            ResolvedValue::String(s) => Value::String(s.clone()),
            ResolvedValue::Bool(b) => Value::Bool(*b),
            ResolvedValue::Integer(i) => Value::from(*i),
            ResolvedValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ResolvedValue::Spec(variant) => {
                let mut map = Map::new();
                map.insert(variant.variant.clone(), variant.spec.to_json());
                Value::Object(map)
            }
        }
    }
}

/// The branch chosen for a union option together with its resolved spec
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    variant: String,
    spec: ResolvedSpec,
}

impl VariantSpec {
    pub(crate) fn new(variant: String, spec: ResolvedSpec) -> Self {
        Self { variant, spec }
    }

    /// Discriminator value that selected the branch
    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn spec(&self) -> &ResolvedSpec {
        &self.spec
    }

    pub fn into_spec(self) -> ResolvedSpec {
        self.spec
    }
}

/// Immutable result of resolving a [`SpecSchema`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpec {
    schema: String,
    values: Vec<(String, ResolvedValue)>,
}

impl ResolvedSpec {
    pub(crate) fn new(schema: impl Into<String>, values: Vec<(String, ResolvedValue)>) -> Self {
        Self {
            schema: schema.into(),
            values,
        }
    }

    /// Name of the schema this spec was resolved against
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(ResolvedValue::is_set)
    }

    /// `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Result<Option<&str>> {
        match self.lookup(name)? {
            ResolvedValue::Unset => Ok(None),
            ResolvedValue::String(s) => Ok(Some(s)),
            _ => Err(self.field_type(name, "string")),
        }
    }

    pub fn bool(&self, name: &str) -> Result<Option<bool>> {
        match self.lookup(name)? {
            ResolvedValue::Unset => Ok(None),
            ResolvedValue::Bool(b) => Ok(Some(*b)),
            _ => Err(self.field_type(name, "boolean")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<Option<i64>> {
        match self.lookup(name)? {
            ResolvedValue::Unset => Ok(None),
            ResolvedValue::Integer(i) => Ok(Some(*i)),
            _ => Err(self.field_type(name, "integer")),
        }
    }

    /// An integer option that must not be negative
    pub fn unsigned(&self, name: &str) -> Result<Option<u64>> {
        match self.integer(name)? {
            None => Ok(None),
            Some(i) => u64::try_from(i)
                .map(Some)
                .map_err(|_| self.field_type(name, "non-negative integer")),
        }
    }

    pub fn float(&self, name: &str) -> Result<Option<f64>> {
        match self.lookup(name)? {
            ResolvedValue::Unset => Ok(None),
            ResolvedValue::Float(f) => Ok(Some(*f)),
            ResolvedValue::Integer(i) => Ok(Some(*i as f64)),
            _ => Err(self.field_type(name, "float")),
        }
    }

    pub fn variant(&self, name: &str) -> Result<Option<&VariantSpec>> {
        match self.lookup(name)? {
            ResolvedValue::Unset => Ok(None),
            ResolvedValue::Spec(variant) => Ok(Some(variant)),
            _ => Err(self.field_type(name, "nested spec")),
        }
    }

    /// Like [`string`](Self::string) but fails when the option is unset.
    pub fn required_string(&self, name: &str) -> Result<&str> {
        self.string(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn required_bool(&self, name: &str) -> Result<bool> {
        self.bool(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn required_unsigned(&self, name: &str) -> Result<u64> {
        self.unsigned(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn required_variant(&self, name: &str) -> Result<&VariantSpec> {
        self.variant(name)?.ok_or_else(|| self.missing(name))
    }

    /// JSON object mirroring the spec; unset options become `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }

    fn lookup(&self, name: &str) -> Result<&ResolvedValue> {
        self.get(name).ok_or_else(|| Error::FieldType {
            option: self.path(name),
            expected: "declared option".to_string(),
        })
    }

    fn field_type(&self, name: &str, expected: &str) -> Error {
        Error::FieldType {
            option: self.path(name),
            expected: expected.to_string(),
        }
    }

    fn missing(&self, name: &str) -> Error {
        Error::MissingRequiredOption {
            option: self.path(name),
            required_by: None,
        }
    }

    fn path(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }
}

/// A typed record backed by a static schema
///
/// Implementors declare their schema once (typically in a `LazyLock`) and
/// convert the generic [`ResolvedSpec`] into named, typed fields.
pub trait SpecRecord: Sized {
    type Error: From<Error>;

    fn schema() -> std::result::Result<&'static SpecSchema, Self::Error>;

    fn from_resolved(spec: ResolvedSpec) -> std::result::Result<Self, Self::Error>;
}

/// Resolve `raw` against `T`'s schema and convert the result into `T`.
pub fn resolve_record<T: SpecRecord>(
    raw: &Value,
    overrides: &dyn OverrideSource,
    context: &RunContext,
) -> std::result::Result<T, T::Error> {
    let schema = T::schema()?;
    let spec = resolve(schema, raw, overrides, context)?;
    T::from_resolved(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ResolvedSpec {
        let nested = ResolvedSpec::new(
            "gce_vm",
            vec![(
                "machine_type".to_string(),
                ResolvedValue::String("n1-standard-1".to_string()),
            )],
        );
        ResolvedSpec::new(
            "managed_relational_db",
            vec![
                ("database".to_string(), ResolvedValue::String("mysql".to_string())),
                ("high_availability".to_string(), ResolvedValue::Bool(false)),
                ("disk_size".to_string(), ResolvedValue::Integer(50)),
                ("ratio".to_string(), ResolvedValue::Float(0.5)),
                ("zone".to_string(), ResolvedValue::Unset),
                (
                    "vm_spec".to_string(),
                    ResolvedValue::Spec(VariantSpec::new("GCP".to_string(), nested)),
                ),
            ],
        )
    }

    #[test]
    fn typed_accessors_return_values() {
        let spec = sample();
        assert_eq!(spec.string("database").unwrap(), Some("mysql"));
        assert_eq!(spec.bool("high_availability").unwrap(), Some(false));
        assert_eq!(spec.integer("disk_size").unwrap(), Some(50));
        assert_eq!(spec.unsigned("disk_size").unwrap(), Some(50));
        assert_eq!(spec.float("ratio").unwrap(), Some(0.5));
        assert_eq!(spec.float("disk_size").unwrap(), Some(50.0));

        let vm = spec.required_variant("vm_spec").unwrap();
        assert_eq!(vm.variant(), "GCP");
        assert_eq!(vm.spec().string("machine_type").unwrap(), Some("n1-standard-1"));
    }

    #[test]
    fn unset_is_distinct_from_falsy() {
        let spec = sample();
        assert!(!spec.is_set("zone"));
        assert!(spec.is_set("high_availability"));
        assert_eq!(spec.string("zone").unwrap(), None);
        assert_eq!(spec.get("zone"), Some(&ResolvedValue::Unset));
    }

    #[test]
    fn mismatched_accessor_is_field_type_error() {
        let spec = sample();
        assert_eq!(
            spec.bool("database"),
            Err(Error::FieldType {
                option: "managed_relational_db.database".to_string(),
                expected: "boolean".to_string(),
            })
        );
        assert!(matches!(spec.string("nonexistent"), Err(Error::FieldType { .. })));
    }

    #[test]
    fn required_accessor_on_unset_is_missing() {
        let spec = sample();
        assert!(matches!(
            spec.required_string("zone"),
            Err(Error::MissingRequiredOption { .. })
        ));
    }

    #[test]
    fn to_json_mirrors_declaration() {
        let json = sample().to_json();
        assert_eq!(
            json,
            json!({
                "database": "mysql",
                "high_availability": false,
                "disk_size": 50,
                "ratio": 0.5,
                "zone": null,
                "vm_spec": { "GCP": { "machine_type": "n1-standard-1" } }
            })
        );
    }

    #[test]
    fn iter_preserves_order() {
        let spec = sample();
        let names: Vec<&str> = spec.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["database", "high_availability", "disk_size", "ratio", "zone", "vm_spec"]
        );
    }
}
