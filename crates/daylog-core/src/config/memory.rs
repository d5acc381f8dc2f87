//! In-memory configuration provider

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{ConfigProvider, DEBUG_KEY, DIRECTORY_KEY, PROCESS_KEY};

/// In-memory configuration provider
///
/// Useful for tests and for hosts that push configuration changes at runtime:
/// every write is visible to the next log call.
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    settings: RwLock<HashMap<String, String>>,
    fallback_process_name: RwLock<Option<String>>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial settings
    pub fn with_settings<K, V>(settings: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            settings: RwLock::new(
                settings
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            fallback_process_name: RwLock::new(None),
        }
    }

    /// Set the process name used when no setting provides one
    pub fn with_fallback_process_name(self, name: impl Into<String>) -> Self {
        *self.fallback_process_name.write() = Some(name.into());
        self
    }

    /// Set a raw setting
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.write().insert(key.into(), value.into());
    }

    /// Remove a raw setting
    pub fn unset(&self, key: &str) -> Option<String> {
        self.settings.write().remove(key)
    }

    /// Turn debug events on or off
    pub fn set_debug(&self, enabled: bool) {
        self.set(DEBUG_KEY, if enabled { "yes" } else { "no" });
    }

    /// Set the explicit logger process name
    pub fn set_process_name(&self, name: impl Into<String>) {
        self.set(PROCESS_KEY, name);
    }

    /// Set the log directory
    pub fn set_directory(&self, dir: impl AsRef<std::path::Path>) {
        self.set(DIRECTORY_KEY, dir.as_ref().to_string_lossy().into_owned());
    }

    /// Clear all settings
    pub fn clear(&self) {
        self.settings.write().clear();
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn setting(&self, key: &str) -> Option<String> {
        self.settings.read().get(key).cloned()
    }

    fn fallback_process_name(&self) -> Option<String> {
        self.fallback_process_name.read().clone()
    }
}
