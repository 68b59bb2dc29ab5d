//! Raw config and override fixtures.

use serde_json::{Value, json};
use spec_core::{FlagValues, RunContext};

/// Run URI used by every fixture context
pub const TEST_RUN_URI: &str = "123";

/// Run context for [`TEST_RUN_URI`]
pub fn run_context() -> RunContext {
    RunContext::new(TEST_RUN_URI).expect("TEST_RUN_URI is a valid run URI")
}

/// Smallest valid managed database component.
pub fn minimal_db_config() -> Value {
    json!({
        "cloud": "GCP",
        "database": "mysql",
        "vm_spec": {
            "GCP": {
                "machine_type": "n1-standard-1"
            }
        }
    })
}

/// Managed database component with explicit name and password.
pub fn full_db_config() -> Value {
    merged(
        minimal_db_config(),
        json!({
            "database_name": "fake_name",
            "database_password": "fake_password"
        }),
    )
}

/// `base` with the top-level keys of `extra` inserted or replaced.
pub fn merged(mut base: Value, extra: Value) -> Value {
    if let (Some(base_map), Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        base_map.extend(extra_map);
    }
    base
}

/// Flag set with every pair explicitly set.
pub fn flags<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> FlagValues {
    let mut flags = FlagValues::new();
    for (name, value) in pairs {
        flags.parse(name, value);
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_extends_minimal() {
        let full = full_db_config();
        assert_eq!(full["database"], "mysql");
        assert_eq!(full["database_name"], "fake_name");
        assert_eq!(full["vm_spec"], minimal_db_config()["vm_spec"]);
    }

    #[test]
    fn flags_are_explicit() {
        let flags = flags([("database", json!("postgres"))]);
        assert!(flags.is_explicitly_set("database"));
    }
}
