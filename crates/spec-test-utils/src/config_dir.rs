//! [`ConfigDir`] for tests that load config documents from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding config documents.
///
/// # Example
///
/// ```rust
/// use spec_test_utils::config_dir::ConfigDir;
///
/// let dir = ConfigDir::new();
/// let path = dir.write("db.yaml", "database: mysql\n");
/// assert!(path.exists());
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ConfigDir::new: failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` under the root and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("ConfigDir::write: failed to create parent");
        }
        fs::write(&path, content).expect("ConfigDir::write: failed to write config");
        path
    }

    /// Write `value` as pretty JSON to `name`.
    pub fn write_json(&self, name: &str, value: &serde_json::Value) -> PathBuf {
        let content =
            serde_json::to_string_pretty(value).expect("ConfigDir::write_json: failed to serialize");
        self.write(name, &content)
    }
}
