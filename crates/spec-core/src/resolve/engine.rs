//! Per-option precedence chain

use serde_json::{Map, Value};

use crate::context::RunContext;
use crate::error::{Error, InvalidReason, Result};
use crate::overrides::OverrideSource;
use crate::resolved::{ResolvedSpec, ResolvedValue};
use crate::schema::{DefaultValue, OptionKind, OptionSchema, SpecSchema, join_path};

/// Resolve `raw` against `schema`.
///
/// Resolution is all-or-nothing: the first failure aborts the call and no
/// partially populated spec is returned.
pub fn resolve(
    schema: &SpecSchema,
    raw: &Value,
    overrides: &dyn OverrideSource,
    context: &RunContext,
) -> Result<ResolvedSpec> {
    tracing::debug!(schema = %schema.name(), run_uri = %context, "Resolving spec");
    Resolver { overrides, context }.resolve_schema(schema, raw, "")
}

pub(super) struct Resolver<'a> {
    pub(super) overrides: &'a dyn OverrideSource,
    pub(super) context: &'a RunContext,
}

impl Resolver<'_> {
    /// Resolve one schema level. `prefix` is the dotted path of the level,
    /// empty at the top.
    pub(super) fn resolve_schema(
        &self,
        schema: &SpecSchema,
        raw: &Value,
        prefix: &str,
    ) -> Result<ResolvedSpec> {
        let component = if prefix.is_empty() {
            schema.name()
        } else {
            prefix
        };
        let empty = Map::new();
        let mapping = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidValue {
                    option: component.to_string(),
                    value: other.to_string(),
                    reason: InvalidReason::WrongKind {
                        expected: "mapping".to_string(),
                    },
                });
            }
        };

        reject_unknown_keys(schema, mapping, component)?;

        let unset = ResolvedValue::Unset;
        let mut slots: Vec<Option<ResolvedValue>> = vec![None; schema.len()];

        for (index, option) in schema.options().iter().enumerate() {
            if option.kind().is_union() {
                continue;
            }
            let path = join_path(prefix, option.name());
            slots[index] = Some(self.resolve_option(option, mapping.get(option.name()), &path)?);
        }

        for (index, option) in schema.options().iter().enumerate() {
            let OptionKind::Union(union) = option.kind() else {
                continue;
            };
            let discriminator = schema
                .position(union.discriminator())
                .and_then(|i| slots[i].as_ref())
                .unwrap_or(&unset);
            let path = join_path(prefix, option.name());
            let value = self.dispatch(
                option,
                union,
                discriminator,
                mapping.get(option.name()),
                prefix,
                &path,
            )?;
            slots[index] = Some(value);
        }

        let values: Vec<(String, ResolvedValue)> = schema
            .options()
            .iter()
            .zip(slots)
            .map(|(option, slot)| (option.name().to_string(), slot.unwrap_or(ResolvedValue::Unset)))
            .collect();

        check_conditional_requirements(schema, &values, prefix)?;

        Ok(ResolvedSpec::new(schema.name(), values))
    }

    fn resolve_option(
        &self,
        option: &OptionSchema,
        raw: Option<&Value>,
        path: &str,
    ) -> Result<ResolvedValue> {
        if let Some(flag) = option.flag_name() {
            if let Some(flag_value) = self.overrides.get(flag) {
                if flag_value.explicitly_set {
                    tracing::debug!(option = %path, flag, "Using explicitly set override");
                    return option.check(path, &flag_value.value);
                }
            }
        }

        if let Some(value) = raw.filter(|v| !v.is_null()) {
            tracing::debug!(option = %path, "Using config value");
            return option.check(path, value);
        }

        match option.default() {
            Some(DefaultValue::Static(value)) => {
                tracing::debug!(option = %path, "Using static default");
                option.check(path, value)
            }
            Some(DefaultValue::Generated(generator)) => {
                tracing::debug!(option = %path, ?generator, "Using generated default");
                option.check(path, &generator.generate(self.context))
            }
            None if option.is_required() => Err(Error::MissingRequiredOption {
                option: path.to_string(),
                required_by: None,
            }),
            None => {
                tracing::trace!(option = %path, "Option left unset");
                Ok(ResolvedValue::Unset)
            }
        }
    }
}

fn reject_unknown_keys(schema: &SpecSchema, mapping: &Map<String, Value>, component: &str) -> Result<()> {
    let mut unknown: Vec<String> = mapping
        .keys()
        .filter(|key| !schema.contains(key))
        .cloned()
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort();
    Err(Error::UnknownOption {
        component: component.to_string(),
        keys: unknown,
    })
}

fn check_conditional_requirements(
    schema: &SpecSchema,
    values: &[(String, ResolvedValue)],
    prefix: &str,
) -> Result<()> {
    let is_set = |name: &str| {
        values
            .iter()
            .any(|(n, v)| n == name && v.is_set())
    };

    for option in schema.options() {
        let Some(trigger) = option.required_with_option() else {
            continue;
        };
        if is_set(trigger) && !is_set(option.name()) {
            return Err(Error::MissingRequiredOption {
                option: join_path(prefix, option.name()),
                required_by: Some(join_path(prefix, trigger)),
            });
        }
    }

    Ok(())
}
