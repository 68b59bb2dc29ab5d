//! Resolve command

use std::path::PathBuf;

use spec_core::{FlagValues, RunContext, SpecSchema};
use spec_db::{builtin_schema, component, load_raw_config, resolve_managed_db};

use crate::error::{CliError, Result};

/// Arguments of the resolve command
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub config: PathBuf,
    pub component: Option<String>,
    pub run_uri: Option<String>,
    pub flags: Vec<String>,
    pub pretty: bool,
}

/// Run the resolve command
pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let raw = load_raw_config(&args.config)?;
    let raw = component(&raw, args.component.as_deref().unwrap_or(""))?;

    let context = match &args.run_uri {
        Some(run_uri) => RunContext::new(run_uri.as_str())?,
        None => RunContext::generate(),
    };
    let context = RunContext::install(context)?;

    let flags = parse_flags(builtin_schema()?, &args.flags)?;
    tracing::debug!(flags = ?flags.names(), %context, "Resolving managed database spec");

    let spec = resolve_managed_db(raw, &flags, context)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&spec)?
    } else {
        serde_json::to_string(&spec)?
    };
    println!("{}", output);

    Ok(())
}

/// Turn `NAME=VALUE` arguments into explicitly set flags.
///
/// Each value is parsed according to the kind of the option the flag
/// overrides, so `managed_db_high_availability=true` becomes a boolean.
pub fn parse_flags(schema: &SpecSchema, args: &[String]) -> Result<FlagValues> {
    let mut flags = FlagValues::new();

    for arg in args {
        let Some((name, raw)) = arg.split_once('=') else {
            return Err(CliError::user(format!(
                "Invalid flag '{}': expected NAME=VALUE",
                arg
            )));
        };
        let name = name.trim();
        let Some(option) = schema.find_flag(name) else {
            return Err(CliError::user(format!("Unknown flag: {}", name)));
        };
        flags.parse(name, option.parse_flag(raw)?);
    }

    Ok(flags)
}
