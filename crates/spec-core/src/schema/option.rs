//! Declaration of a single configurable option

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::SpecSchema;
use crate::defaults::DefaultGenerator;
use crate::error::{Error, InvalidReason, Result};
use crate::resolved::ResolvedValue;

/// Value kind of an option
#[derive(Debug, Clone)]
pub enum OptionKind {
    String,
    /// A string restricted to the option's allowed values
    Enum,
    Boolean,
    Integer,
    Float,
    /// A nested spec whose schema is chosen by a discriminator
    Union(UnionKind),
}

impl OptionKind {
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::String => "string",
            OptionKind::Enum => "enum",
            OptionKind::Boolean => "boolean",
            OptionKind::Integer => "integer",
            OptionKind::Float => "float",
            OptionKind::Union(_) => "union",
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, OptionKind::Union(_))
    }

    fn is_numeric(&self) -> bool {
        matches!(self, OptionKind::Integer | OptionKind::Float)
    }
}

/// Branch table of a union option
#[derive(Debug, Clone)]
pub struct UnionKind {
    discriminator: String,
    branches: BTreeMap<String, SpecSchema>,
}

impl UnionKind {
    /// Name of the sibling option whose value selects the branch
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn branch(&self, variant: &str) -> Option<&SpecSchema> {
        self.branches.get(variant)
    }

    pub fn has_branch(&self, variant: &str) -> bool {
        self.branches.contains_key(variant)
    }

    /// Sorted variant names
    pub fn variants(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    pub fn branches(&self) -> impl Iterator<Item = (&str, &SpecSchema)> {
        self.branches.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Default applied when neither an override nor a config value is present
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Static(Value),
    Generated(Arc<dyn DefaultGenerator>),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(value) => write!(f, "{}", value),
            DefaultValue::Generated(generator) => write!(f, "<{:?}>", generator),
        }
    }
}

/// One configurable field of a [`SpecSchema`]
///
/// Options are declared with a kind constructor and refined with chained
/// setters:
///
/// ```
/// use spec_core::OptionSchema;
///
/// let option = OptionSchema::enumeration("database", ["mysql", "postgres"]).required();
/// assert!(option.is_required());
/// assert_eq!(option.flag_name(), Some("database"));
/// ```
#[derive(Debug, Clone)]
pub struct OptionSchema {
    name: String,
    kind: OptionKind,
    required: bool,
    default: Option<DefaultValue>,
    allowed_values: Option<Vec<Value>>,
    is_discriminator: bool,
    flag: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    required_with: Option<String>,
    description: Option<String>,
}

impl OptionSchema {
    fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        let name = name.into();
        let flag = (!kind.is_union()).then(|| name.clone());
        Self {
            name,
            kind,
            required: false,
            default: None,
            allowed_values: None,
            is_discriminator: false,
            flag,
            min: None,
            max: None,
            required_with: None,
            description: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Float)
    }

    /// A string option restricted to `allowed`
    pub fn enumeration<I, S>(name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(|s| Value::String(s.into())).collect();
        let mut option = Self::new(name, OptionKind::Enum);
        option.allowed_values = Some(allowed);
        option
    }

    /// A nested spec selected by the sibling option `discriminator`
    pub fn union<I, S>(name: impl Into<String>, discriminator: impl Into<String>, branches: I) -> Self
    where
        I: IntoIterator<Item = (S, SpecSchema)>,
        S: Into<String>,
    {
        let branches = branches.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new(
            name,
            OptionKind::Union(UnionKind {
                discriminator: discriminator.into(),
                branches,
            }),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    pub fn default_with(mut self, generator: impl DefaultGenerator + 'static) -> Self {
        self.default = Some(DefaultValue::Generated(Arc::new(generator)));
        self
    }

    /// Restrict the option to a permitted set of values.
    pub fn allowed_values<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Mark the option as selecting a union branch.
    pub fn discriminator(mut self) -> Self {
        self.is_discriminator = true;
        self
    }

    /// Consult the override source under `flag` instead of the option name.
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Never consult the override source for this option.
    pub fn no_flag(mut self) -> Self {
        self.flag = None;
        self
    }

    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Require this option whenever the sibling `other` resolves to a value.
    pub fn required_with(mut self, other: impl Into<String>) -> Self {
        self.required_with = Some(other.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    pub fn is_discriminator(&self) -> bool {
        self.is_discriminator
    }

    pub fn flag_name(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min, self.max)
    }

    pub fn required_with_option(&self) -> Option<&str> {
        self.required_with.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Validate `value` against the option's kind, permitted set and bounds.
    ///
    /// `path` is the dotted option path used in error messages. Union
    /// options are resolved by the dispatcher and never checked here.
    pub(crate) fn check(&self, path: &str, value: &Value) -> Result<ResolvedValue> {
        let resolved = match &self.kind {
            OptionKind::String | OptionKind::Enum => value
                .as_str()
                .map(|s| ResolvedValue::String(s.to_string())),
            OptionKind::Boolean => value.as_bool().map(ResolvedValue::Bool),
            OptionKind::Integer => as_integer(value).map(ResolvedValue::Integer),
            OptionKind::Float => value.as_f64().map(ResolvedValue::Float),
            OptionKind::Union(_) => None,
        };
        let Some(resolved) = resolved else {
            return Err(self.invalid(
                path,
                value,
                InvalidReason::WrongKind {
                    expected: self.kind.name().to_string(),
                },
            ));
        };

        if let Some(allowed) = &self.allowed_values {
            if !allowed.iter().any(|candidate| same_value(candidate, value)) {
                let allowed: Vec<String> = allowed.iter().map(display_allowed).collect();
                if self.is_discriminator {
                    return Err(Error::UnsupportedDiscriminatorValue {
                        discriminator: path.to_string(),
                        value: value.to_string(),
                        supported: allowed,
                    });
                }
                return Err(self.invalid(path, value, InvalidReason::NotAllowed { allowed }));
            }
        }

        if self.kind.is_numeric() {
            if let Some(number) = value.as_f64() {
                let below = self.min.is_some_and(|min| number < min);
                let above = self.max.is_some_and(|max| number > max);
                if below || above {
                    return Err(self.invalid(
                        path,
                        value,
                        InvalidReason::OutOfRange {
                            min: self.min,
                            max: self.max,
                        },
                    ));
                }
            }
        }

        Ok(resolved)
    }

    /// Parse a textual flag value into a value of this option's kind.
    ///
    /// Command-line front ends use this so that `--flag cpus=4` arrives as
    /// an integer rather than a string. The result is still validated
    /// during resolution.
    pub fn parse_flag(&self, raw: &str) -> Result<Value> {
        let parsed = match &self.kind {
            OptionKind::String | OptionKind::Enum => Some(Value::String(raw.to_string())),
            OptionKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Some(Value::Bool(true)),
                "false" | "no" | "0" | "off" => Some(Value::Bool(false)),
                _ => None,
            },
            OptionKind::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
            OptionKind::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            OptionKind::Union(_) => None,
        };

        parsed.ok_or_else(|| {
            self.invalid(
                self.flag.as_deref().unwrap_or(&self.name),
                &Value::String(raw.to_string()),
                InvalidReason::WrongKind {
                    expected: self.kind.name().to_string(),
                },
            )
        })
    }

    fn invalid(&self, path: &str, value: &Value, reason: InvalidReason) -> Error {
        Error::InvalidValue {
            option: path.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f <= i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn display_allowed(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
