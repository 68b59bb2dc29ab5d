//! Union branch selection

use serde_json::{Map, Value};

use super::engine::Resolver;
use crate::error::{Error, InvalidReason, Result};
use crate::resolved::{ResolvedValue, VariantSpec};
use crate::schema::{OptionSchema, UnionKind, join_path};

impl Resolver<'_> {
    /// Resolve a union option from its already resolved discriminator.
    ///
    /// The raw value under the union key maps variant names to sub-mappings,
    /// e.g. `vm_spec: {GCP: {...}, AWS: {...}}`. Only the selected variant's
    /// sub-mapping is resolved; the others are ignored. A required union
    /// must be present in the config, but the selected variant's
    /// sub-mapping may be omitted and then resolves from branch defaults.
    pub(super) fn dispatch(
        &self,
        option: &OptionSchema,
        union: &UnionKind,
        discriminator: &ResolvedValue,
        raw: Option<&Value>,
        prefix: &str,
        path: &str,
    ) -> Result<ResolvedValue> {
        let discriminator_path = join_path(prefix, union.discriminator());

        let selected = match discriminator {
            ResolvedValue::String(value) => value,
            ResolvedValue::Unset if option.is_required() => {
                return Err(Error::MissingRequiredOption {
                    option: discriminator_path,
                    required_by: Some(path.to_string()),
                });
            }
            ResolvedValue::Unset => return Ok(ResolvedValue::Unset),
            _ => {
                return Err(Error::FieldType {
                    option: discriminator_path,
                    expected: "string".to_string(),
                });
            }
        };

        let Some(branch) = union.branch(selected) else {
            return Err(Error::UnsupportedDiscriminatorValue {
                discriminator: discriminator_path,
                value: Value::String(selected.clone()).to_string(),
                supported: union.variants(),
            });
        };

        let variants = match raw {
            None | Some(Value::Null) if option.is_required() => {
                return Err(Error::MissingRequiredOption {
                    option: path.to_string(),
                    required_by: None,
                });
            }
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                return Err(Error::InvalidValue {
                    option: path.to_string(),
                    value: other.to_string(),
                    reason: InvalidReason::WrongKind {
                        expected: format!("mapping keyed by {}", union.discriminator()),
                    },
                });
            }
        };

        if let Some(variants) = variants {
            let mut unknown: Vec<String> = variants
                .keys()
                .filter(|key| !union.has_branch(key))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(Error::UnknownOption {
                    component: path.to_string(),
                    keys: unknown,
                });
            }
        }

        let empty = Value::Object(Map::new());
        let sub_mapping = variants
            .and_then(|map| map.get(selected.as_str()))
            .unwrap_or(&empty);

        tracing::debug!(
            option = %path,
            variant = %selected,
            schema = %branch.name(),
            "Selected union branch"
        );

        let spec = self.resolve_schema(branch, sub_mapping, &join_path(path, selected))?;
        Ok(ResolvedValue::Spec(VariantSpec::new(selected.clone(), spec)))
    }
}
