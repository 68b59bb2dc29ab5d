//! Managed relational database spec
//!
//! Declares the option table of a managed database component and converts
//! the resolved spec into [`ManagedRelationalDbSpec`].
//!
//! | Option | Default | Flag |
//! |--------|---------|------|
//! | `cloud` | `GCP` | `cloud` |
//! | `database` | required | `database` |
//! | `database_name` | `pkb-db-<run_uri>` | `database_name` |
//! | `database_password` | random, 10 chars | `database_password` |
//! | `database_version` | `5.6` | `database_version` |
//! | `high_availability` | `false` | `managed_db_high_availability` |
//! | `backup_enabled` | `true` | `managed_db_backup_enabled` |
//! | `backup_start_time` | `07:00` | `managed_db_backup_start_time` |
//! | `vm_spec` | required, per cloud | - |
//! | `disk_spec` | optional, per cloud | - |

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;
use spec_core::{
    InvalidReason, OptionSchema, OverrideSource, RandomSecret, ResolvedSpec, RunContext,
    RunScopedName, SpecRecord, SpecSchema, resolve, resolve_record,
};
use spec_providers::{Cloud, CloudDiskSpec, ProviderRegistry, VmSpec};

use crate::database::Database;
use crate::error::{Error, Result};

/// Name of the managed database schema, used as the top-level error component
pub const SCHEMA_NAME: &str = "managed_relational_db";

pub const DEFAULT_CLOUD: Cloud = Cloud::Gcp;
pub const DEFAULT_DATABASE_VERSION: &str = "5.6";
pub const DEFAULT_BACKUP_START_TIME: &str = "07:00";
pub const DATABASE_NAME_PREFIX: &str = "pkb-db";
pub const DATABASE_PASSWORD_LENGTH: usize = 10;

static MANAGED_DB_SCHEMA: LazyLock<spec_core::Result<SpecSchema>> =
    LazyLock::new(|| managed_db_schema(&ProviderRegistry::with_builtins()));

/// Build the managed database schema over the clouds in `registry`.
///
/// The `cloud` default is [`DEFAULT_CLOUD`], so a registry without it fails
/// with `InvalidSchema`.
pub fn managed_db_schema(registry: &ProviderRegistry) -> spec_core::Result<SpecSchema> {
    let databases = Database::ALL.map(|database| database.as_str());

    SpecSchema::builder(SCHEMA_NAME)
        .option(
            OptionSchema::enumeration("cloud", registry.supported_names())
                .default_value(DEFAULT_CLOUD.as_str())
                .discriminator()
                .describe("Cloud the database is provisioned on"),
        )
        .option(
            OptionSchema::enumeration("database", databases)
                .required()
                .describe("Database engine"),
        )
        .option(
            OptionSchema::string("database_name")
                .default_with(RunScopedName::new(DATABASE_NAME_PREFIX))
                .describe("Name of the database instance"),
        )
        .option(
            OptionSchema::string("database_password")
                .default_with(RandomSecret::new(DATABASE_PASSWORD_LENGTH))
                .describe("Password of the database admin user"),
        )
        .option(
            OptionSchema::string("database_version")
                .default_value(DEFAULT_DATABASE_VERSION)
                .describe("Engine version"),
        )
        .option(
            OptionSchema::boolean("high_availability")
                .default_value(false)
                .flag("managed_db_high_availability")
                .describe("Provision a standby replica"),
        )
        .option(
            OptionSchema::boolean("backup_enabled")
                .default_value(true)
                .flag("managed_db_backup_enabled"),
        )
        .option(
            OptionSchema::string("backup_start_time")
                .default_value(DEFAULT_BACKUP_START_TIME)
                .flag("managed_db_backup_start_time")
                .describe("Daily backup window start, HH:MM in UTC"),
        )
        .option(
            OptionSchema::union("vm_spec", "cloud", registry.vm_branches()?)
                .required()
                .describe("Client VM settings keyed by cloud"),
        )
        .option(
            OptionSchema::union("disk_spec", "cloud", registry.disk_branches()?)
                .describe("Database disk settings keyed by cloud"),
        )
        .build()
}

/// Schema over the built-in clouds
pub fn builtin_schema() -> spec_core::Result<&'static SpecSchema> {
    MANAGED_DB_SCHEMA.as_ref().map_err(Clone::clone)
}

/// Resolved managed database component
///
/// `Debug` redacts the password.
#[derive(Clone, PartialEq, Serialize)]
pub struct ManagedRelationalDbSpec {
    pub cloud: Cloud,
    pub database: Database,
    pub database_name: String,
    pub database_password: String,
    pub database_version: String,
    pub high_availability: bool,
    pub backup_enabled: bool,
    pub backup_start_time: String,
    pub vm_spec: VmSpec,
    pub disk_spec: Option<CloudDiskSpec>,
}

impl fmt::Debug for ManagedRelationalDbSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedRelationalDbSpec")
            .field("cloud", &self.cloud)
            .field("database", &self.database)
            .field("database_name", &self.database_name)
            .field("database_password", &"<redacted>")
            .field("database_version", &self.database_version)
            .field("high_availability", &self.high_availability)
            .field("backup_enabled", &self.backup_enabled)
            .field("backup_start_time", &self.backup_start_time)
            .field("vm_spec", &self.vm_spec)
            .field("disk_spec", &self.disk_spec)
            .finish()
    }
}

impl SpecRecord for ManagedRelationalDbSpec {
    type Error = Error;

    fn schema() -> Result<&'static SpecSchema> {
        Ok(builtin_schema()?)
    }

    fn from_resolved(spec: ResolvedSpec) -> Result<Self> {
        let backup_start_time = spec.required_string("backup_start_time")?;
        validate_backup_start_time(backup_start_time)?;

        let disk_spec = match spec.variant("disk_spec")? {
            Some(variant) => Some(CloudDiskSpec::from_variant(variant)?),
            None => None,
        };

        Ok(Self {
            cloud: spec.required_string("cloud")?.parse()?,
            database: spec.required_string("database")?.parse()?,
            database_name: spec.required_string("database_name")?.to_string(),
            database_password: spec.required_string("database_password")?.to_string(),
            database_version: spec.required_string("database_version")?.to_string(),
            high_availability: spec.required_bool("high_availability")?,
            backup_enabled: spec.required_bool("backup_enabled")?,
            backup_start_time: backup_start_time.to_string(),
            vm_spec: VmSpec::from_variant(spec.required_variant("vm_spec")?)?,
            disk_spec,
        })
    }
}

/// Resolve a managed database component over the built-in clouds.
pub fn resolve_managed_db(
    raw: &Value,
    overrides: &dyn OverrideSource,
    context: &RunContext,
) -> Result<ManagedRelationalDbSpec> {
    resolve_record(raw, overrides, context)
}

/// Resolve a managed database component over the clouds in `registry`.
pub fn resolve_managed_db_with(
    registry: &ProviderRegistry,
    raw: &Value,
    overrides: &dyn OverrideSource,
    context: &RunContext,
) -> Result<ManagedRelationalDbSpec> {
    let schema = managed_db_schema(registry)?;
    let spec = resolve(&schema, raw, overrides, context)?;
    ManagedRelationalDbSpec::from_resolved(spec)
}

/// `HH:MM`, 24-hour clock
fn validate_backup_start_time(value: &str) -> Result<()> {
    let valid = value
        .split_once(':')
        .filter(|(hours, minutes)| is_two_digits(hours) && is_two_digits(minutes))
        .and_then(|(hours, minutes)| Some((hours.parse::<u8>().ok()?, minutes.parse::<u8>().ok()?)))
        .is_some_and(|(hours, minutes)| hours < 24 && minutes < 60);

    if valid {
        return Ok(());
    }

    Err(spec_core::Error::InvalidValue {
        option: "backup_start_time".to_string(),
        value: Value::String(value.to_string()).to_string(),
        reason: InvalidReason::WrongKind {
            expected: "HH:MM time".to_string(),
        },
    }
    .into())
}

fn is_two_digits(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit())
}
