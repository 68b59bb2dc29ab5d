//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise library events at `debug` are
/// shown. Stdout stays reserved for command output.
pub fn init() -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug"))
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    Ok(())
}
