//! Resolution against a shared static schema from many threads

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::thread;

use serde_json::json;
use spec_core::{NoOverrides, OptionSchema, RandomSecret, RunContext, RunScopedName, SpecSchema, resolve};

static SCHEMA: LazyLock<spec_core::Result<SpecSchema>> = LazyLock::new(|| {
    SpecSchema::builder("shared")
        .option(OptionSchema::string("name").default_with(RunScopedName::new("pkb-db")))
        .option(OptionSchema::string("password").default_with(RandomSecret::default()))
        .build()
});

#[test]
fn concurrent_resolutions_share_names_but_not_secrets() {
    let context = Arc::new(RunContext::new("123").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = Arc::clone(&context);
            thread::spawn(move || {
                let schema = SCHEMA.as_ref().unwrap();
                let spec = resolve(schema, &json!({}), &NoOverrides, &context).unwrap();
                (
                    spec.required_string("name").unwrap().to_string(),
                    spec.required_string("password").unwrap().to_string(),
                )
            })
        })
        .collect();

    let results: Vec<(String, String)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let names: HashSet<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names.len(), 1);
    assert!(names.contains("pkb-db-123"));

    let secrets: HashSet<&str> = results.iter().map(|(_, s)| s.as_str()).collect();
    assert_eq!(secrets.len(), results.len());
}
