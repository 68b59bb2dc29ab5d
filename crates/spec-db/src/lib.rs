//! Managed relational database spec for benchmark configs.
//!
//! Loads a benchmark config document, picks out the database component and
//! resolves it with command-line overrides into a [`ManagedRelationalDbSpec`]:
//!
//! ```
//! use serde_json::json;
//! use spec_core::{FlagValues, RunContext};
//! use spec_db::{Database, resolve_managed_db};
//!
//! let raw = json!({
//!     "database": "mysql",
//!     "vm_spec": {"GCP": {"machine_type": "n1-standard-1"}}
//! });
//! let mut flags = FlagValues::new();
//! flags.parse("database", "postgres");
//!
//! let spec = resolve_managed_db(&raw, &flags, &RunContext::new("123")?)?;
//! assert_eq!(spec.database, Database::Postgres);
//! assert_eq!(spec.database_name, "pkb-db-123");
//! # Ok::<(), spec_db::Error>(())
//! ```

pub mod database;
pub mod error;
pub mod loader;
pub mod spec;

pub use database::Database;
pub use error::{Error, Result};
pub use loader::{ConfigFormat, component, load_raw_config, parse_raw_config};
pub use spec::{
    ManagedRelationalDbSpec, SCHEMA_NAME, builtin_schema, managed_db_schema, resolve_managed_db,
    resolve_managed_db_with,
};
