//! File-based configuration provider (YAML)
//!
//! Settings live in a flat YAML mapping:
//!
//! ```yaml
//! logger.debug: yes
//! logger.process: billing
//! logger.directory: /var/log/billing
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::traits::{ConfigError, ConfigProvider, ConfigResult};

/// Settings file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    /// Raw settings keyed by dotted name
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_yaml::Value>,
}

impl SettingsFile {
    /// Scalar setting rendered as a string
    ///
    /// Sequences and mappings are not settings and read as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.settings.get(key)? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// File-based configuration provider
///
/// The file is read again on every lookup, so edits take effect on the next
/// log call. A missing or malformed file reads as "nothing configured".
///
/// # Example
///
/// ```no_run
/// use daylog_core::config::{ConfigProvider, FileConfigProvider};
///
/// let config = FileConfigProvider::new("/etc/billing/logger.yaml");
/// let dir = config.log_directory();
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    fallback_process_name: Option<String>,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback_process_name: None,
        }
    }

    /// Create a provider for `<config_dir>/<app>/logger.yaml`
    pub fn user(app: &str) -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join(app).join("logger.yaml"))
    }

    /// Set the process name used when the file provides none
    pub fn with_fallback_process_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_process_name = Some(name.into());
        self
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the settings file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings from file
    ///
    /// A missing file is an empty configuration, not an error.
    pub fn load(&self) -> ConfigResult<SettingsFile> {
        if !self.path.exists() {
            return Ok(SettingsFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SettingsFile::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse YAML: {}", e)))
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn setting(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(file) => file.get(key),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "ignoring unreadable settings file");
                None
            }
        }
    }

    fn fallback_process_name(&self) -> Option<String> {
        self.fallback_process_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_config_provider() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logger.yaml");
        let provider = FileConfigProvider::new(&path).with_fallback_process_name("bin");

        // Missing file reads as unset
        assert!(!provider.exists());
        assert!(!provider.debug_enabled());
        assert_eq!(provider.process_name(), "bin");

        fs::write(&path, "logger.debug: si\nlogger.process: svc\n").unwrap();
        assert!(provider.debug_enabled());
        assert_eq!(provider.process_name(), "svc");

        // Re-read on every lookup
        fs::write(&path, "logger.debug: no\napplication.name: billing\n").unwrap();
        assert!(!provider.debug_enabled());
        assert_eq!(provider.process_name(), "billing");
    }

    #[test]
    fn test_scalar_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logger.yaml");
        fs::write(&path, "logger.debug: true\nlogger.process: 42\nlist: [1, 2]\n").unwrap();

        let provider = FileConfigProvider::new(&path);
        assert!(provider.debug_enabled());
        assert_eq!(provider.process_name(), "42");
        assert_eq!(provider.setting("list"), None);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logger.yaml");
        fs::write(&path, "logger.debug: [unclosed").unwrap();

        let provider = FileConfigProvider::new(&path);
        assert!(matches!(provider.load(), Err(ConfigError::Parse(_))));
        assert!(!provider.debug_enabled());
    }
}
