//! Config document loading
//!
//! Benchmark configs are YAML, JSON or TOML documents. Whatever the format,
//! they load into a `serde_json::Value` mapping so resolution only ever sees
//! one raw representation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Read and parse the config document at `path`.
pub fn load_raw_config(path: &Path) -> Result<Value> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), %format, "Loading config document");
    parse_raw_config(&content, format)
}

/// Parse a config document. An empty document is an empty mapping.
pub fn parse_raw_config(content: &str, format: ConfigFormat) -> Result<Value> {
    let value: Value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };

    match value {
        Value::Null => Ok(Value::Object(Default::default())),
        Value::Object(_) => Ok(value),
        other => Err(Error::NotAMapping {
            path: "<document>".to_string(),
            found: kind_of(&other).to_string(),
        }),
    }
}

/// Look up the component mapping at a dotted path such as
/// `benchmark.managed_relational_db`. An empty path is the whole document.
pub fn component<'a>(raw: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = raw;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = current
            .as_object()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| Error::ComponentNotFound {
                path: path.to_string(),
            })?;
    }

    match current {
        Value::Object(_) | Value::Null => Ok(current),
        other => Err(Error::NotAMapping {
            path: path.to_string(),
            found: kind_of(other).to_string(),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
