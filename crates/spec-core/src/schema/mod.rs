//! Spec schema declaration
//!
//! A [`SpecSchema`] is an ordered collection of [`OptionSchema`] entries
//! describing one spec shape. Schemas are built once through a
//! [`SpecSchemaBuilder`], which checks the structural invariants, and are
//! immutable afterwards so the same schema can back any number of
//! concurrent resolutions.

mod option;

pub use option::{DefaultValue, OptionKind, OptionSchema, UnionKind};

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Immutable, validated collection of options
#[derive(Debug, Clone)]
pub struct SpecSchema {
    name: String,
    options: Vec<OptionSchema>,
}

impl SpecSchema {
    pub fn builder(name: impl Into<String>) -> SpecSchemaBuilder {
        SpecSchemaBuilder {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options in declaration order
    pub fn options(&self) -> &[OptionSchema] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionSchema> {
        self.options.iter().find(|o| o.name() == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Find the first option, here or in any union branch, consulted under `flag`.
    pub fn find_flag(&self, flag: &str) -> Option<&OptionSchema> {
        for option in &self.options {
            if option.flag_name() == Some(flag) {
                return Some(option);
            }
            if let OptionKind::Union(union) = option.kind() {
                for (_, branch) in union.branches() {
                    if let Some(found) = branch.find_flag(flag) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Every option with its dotted path, branches included
    ///
    /// Branch options appear as `<union>.<variant>.<option>` directly after
    /// their union option.
    pub fn walk(&self) -> Vec<(String, &OptionSchema)> {
        let mut entries = Vec::new();
        self.walk_into("", &mut entries);
        entries
    }

    fn walk_into<'a>(&'a self, prefix: &str, entries: &mut Vec<(String, &'a OptionSchema)>) {
        for option in &self.options {
            let path = join_path(prefix, option.name());
            if let OptionKind::Union(union) = option.kind() {
                entries.push((path.clone(), option));
                for (variant, branch) in union.branches() {
                    branch.walk_into(&join_path(&path, variant), entries);
                }
            } else {
                entries.push((path, option));
            }
        }
    }
}

/// Builder checking schema invariants on [`build`](SpecSchemaBuilder::build)
#[derive(Debug)]
pub struct SpecSchemaBuilder {
    name: String,
    options: Vec<OptionSchema>,
}

impl SpecSchemaBuilder {
    pub fn option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = OptionSchema>) -> Self {
        self.options.extend(options);
        self
    }

    /// Validate and freeze the schema.
    ///
    /// Fails with [`Error::InvalidSchema`] when:
    /// - two options share a name
    /// - a required option declares a default
    /// - an enum option has no allowed values
    /// - a static default fails the option's own validation
    /// - a union declares a default, is itself a discriminator, or references a
    ///   discriminator that is missing, not a discriminator enum, or whose
    ///   allowed values differ from the union's branch keys
    /// - a conditional requirement names a missing or union sibling
    pub fn build(self) -> Result<SpecSchema> {
        let schema = SpecSchema {
            name: self.name,
            options: self.options,
        };
        check_invariants(&schema)?;
        tracing::trace!(schema = %schema.name, options = schema.options.len(), "Built spec schema");
        Ok(schema)
    }
}

fn check_invariants(schema: &SpecSchema) -> Result<()> {
    let invalid = |reason: String| Error::InvalidSchema {
        schema: schema.name.clone(),
        reason,
    };

    let mut seen = HashSet::new();
    for option in &schema.options {
        if !seen.insert(option.name()) {
            return Err(invalid(format!("duplicate option {}", option.name())));
        }
    }

    for option in &schema.options {
        let name = option.name();

        if option.is_required() && option.default().is_some() {
            return Err(invalid(format!("required option {} declares a default", name)));
        }

        if matches!(option.kind(), OptionKind::Enum)
            && option.allowed().is_none_or(|allowed| allowed.is_empty())
        {
            return Err(invalid(format!("enum option {} has no allowed values", name)));
        }

        if option.is_discriminator() && !matches!(option.kind(), OptionKind::Enum) {
            return Err(invalid(format!(
                "discriminator {} must be an enum option",
                name
            )));
        }

        if let Some(DefaultValue::Static(value)) = option.default() {
            if !option.kind().is_union() {
                option.check(name, value).map_err(|e| {
                    invalid(format!("default for {} is invalid: {}", name, e))
                })?;
            }
        }

        if let Some(other) = option.required_with_option() {
            match schema.option(other) {
                None => {
                    return Err(invalid(format!(
                        "{} is required with unknown option {}",
                        name, other
                    )));
                }
                Some(sibling) if sibling.kind().is_union() => {
                    return Err(invalid(format!(
                        "{} cannot be required with union option {}",
                        name, other
                    )));
                }
                Some(_) => {}
            }
        }

        if let OptionKind::Union(union) = option.kind() {
            check_union(schema, option, union).map_err(invalid)?;
        }
    }

    Ok(())
}

fn check_union(
    schema: &SpecSchema,
    option: &OptionSchema,
    union: &UnionKind,
) -> std::result::Result<(), String> {
    let name = option.name();

    if option.default().is_some() {
        return Err(format!("union option {} cannot declare a default", name));
    }
    if option.is_discriminator() {
        return Err(format!("union option {} cannot be a discriminator", name));
    }

    let discriminator = schema.option(union.discriminator()).ok_or_else(|| {
        format!(
            "union {} references unknown discriminator {}",
            name,
            union.discriminator()
        )
    })?;
    if !discriminator.is_discriminator() {
        return Err(format!(
            "union {} references {} which is not marked as a discriminator",
            name,
            discriminator.name()
        ));
    }

    let mut allowed: Vec<String> = discriminator
        .allowed()
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect();
    allowed.sort();
    allowed.dedup();
    let variants = union.variants();
    if allowed != variants {
        return Err(format!(
            "union {} branches [{}] do not match discriminator {} values [{}]",
            name,
            variants.join(", "),
            discriminator.name(),
            allowed.join(", ")
        ));
    }

    Ok(())
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::RunScopedName;

    fn branch(name: &str) -> SpecSchema {
        SpecSchema::builder(name)
            .option(OptionSchema::string("machine_type"))
            .build()
            .unwrap()
    }

    fn reason(result: Result<SpecSchema>) -> String {
        match result {
            Err(Error::InvalidSchema { reason, .. }) => reason,
            other => panic!("expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn build_preserves_declaration_order() {
        let schema = SpecSchema::builder("db")
            .option(OptionSchema::string("b"))
            .option(OptionSchema::string("a"))
            .build()
            .unwrap();

        let names: Vec<&str> = schema.options().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("a"));
        assert!(!schema.contains("c"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::string("a"))
            .option(OptionSchema::integer("a"))
            .build();
        assert!(reason(result).contains("duplicate option a"));
    }

    #[test]
    fn required_option_with_default_is_rejected() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::string("name").required().default_value("x"))
            .build();
        assert!(reason(result).contains("declares a default"));

        let result = SpecSchema::builder("db")
            .option(
                OptionSchema::string("name")
                    .required()
                    .default_with(RunScopedName::new("pkb")),
            )
            .build();
        assert!(reason(result).contains("declares a default"));
    }

    #[test]
    fn invalid_static_default_is_rejected() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("database", ["mysql"]).default_value("oracle"))
            .build();
        assert!(reason(result).contains("default for database is invalid"));
    }

    #[test]
    fn enum_without_values_is_rejected() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("database", Vec::<String>::new()))
            .build();
        assert!(reason(result).contains("no allowed values"));
    }

    #[test]
    fn union_branches_must_match_discriminator_values() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("cloud", ["AWS", "GCP"]).discriminator())
            .option(OptionSchema::union("vm_spec", "cloud", [("GCP", branch("gcp"))]))
            .build();
        assert!(reason(result).contains("do not match discriminator cloud"));
    }

    #[test]
    fn union_requires_marked_discriminator() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("cloud", ["GCP"]))
            .option(OptionSchema::union("vm_spec", "cloud", [("GCP", branch("gcp"))]))
            .build();
        assert!(reason(result).contains("not marked as a discriminator"));

        let result = SpecSchema::builder("db")
            .option(OptionSchema::union("vm_spec", "cloud", [("GCP", branch("gcp"))]))
            .build();
        assert!(reason(result).contains("unknown discriminator cloud"));
    }

    #[test]
    fn discriminator_must_be_enum() {
        let result = SpecSchema::builder("db")
            .option(OptionSchema::string("cloud").discriminator())
            .build();
        assert!(reason(result).contains("must be an enum option"));
    }

    #[test]
    fn required_with_must_name_a_sibling() {
        let result = SpecSchema::builder("vm")
            .option(OptionSchema::string("memory").required_with("cpus"))
            .build();
        assert!(reason(result).contains("unknown option cpus"));
    }

    #[test]
    fn valid_union_schema_builds() {
        let schema = SpecSchema::builder("db")
            .option(OptionSchema::union(
                "vm_spec",
                "cloud",
                [("GCP", branch("gcp")), ("AWS", branch("aws"))],
            ))
            .option(
                OptionSchema::enumeration("cloud", ["GCP", "AWS"])
                    .discriminator()
                    .default_value("GCP"),
            )
            .build()
            .unwrap();

        let Some(OptionKind::Union(union)) = schema.option("vm_spec").map(|o| o.kind()) else {
            panic!("vm_spec should be a union");
        };
        assert_eq!(union.variants(), vec!["AWS", "GCP"]);
        assert_eq!(union.discriminator(), "cloud");
    }

    #[test]
    fn walk_lists_branch_paths() {
        let schema = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("cloud", ["GCP"]).discriminator())
            .option(OptionSchema::union("vm_spec", "cloud", [("GCP", branch("gcp"))]))
            .build()
            .unwrap();

        let paths: Vec<String> = schema.walk().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["cloud", "vm_spec", "vm_spec.GCP.machine_type"]);
    }

    #[test]
    fn find_flag_searches_branches() {
        let schema = SpecSchema::builder("db")
            .option(OptionSchema::enumeration("cloud", ["GCP"]).discriminator())
            .option(OptionSchema::union("vm_spec", "cloud", [("GCP", branch("gcp"))]))
            .build()
            .unwrap();

        assert_eq!(
            schema.find_flag("machine_type").map(|o| o.name()),
            Some("machine_type")
        );
        assert!(schema.find_flag("vm_spec").is_none());
        assert!(schema.find_flag("missing").is_none());
    }
}
