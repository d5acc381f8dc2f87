//! Environment variable configuration provider

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{ConfigProvider, APPLICATION_NAME_KEY, DEBUG_KEY, DIRECTORY_KEY, PROCESS_KEY};

/// Mapping from setting keys to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(DEBUG_KEY, "LOGGER_DEBUG");
    m.insert(APPLICATION_NAME_KEY, "APPLICATION_NAME");
    m.insert(PROCESS_KEY, "LOGGER_PROCESS");
    m.insert(DIRECTORY_KEY, "LOGGER_DIRECTORY");
    m
});

/// Configuration provider that reads environment variables
///
/// # Key Mapping
///
/// - `logger.debug` → `LOGGER_DEBUG`
/// - `application.name` → `APPLICATION_NAME`
/// - `logger.process` → `LOGGER_PROCESS`
/// - `logger.directory` → `LOGGER_DIRECTORY`
///
/// Unknown keys are looked up by their uppercased, underscore-separated form
/// (`foo.bar` → `FOO_BAR`). Empty variables count as unset.
///
/// # Example
///
/// ```
/// use daylog_core::config::{ConfigProvider, EnvConfigProvider};
///
/// let config = EnvConfigProvider::new().with_fallback_process_name(env!("CARGO_PKG_NAME"));
/// let _dir = config.log_directory();
/// ```
#[derive(Debug, Default, Clone)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
    fallback_process_name: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `PREFIX_` to every variable name, e.g. `MYAPP_LOGGER_DEBUG`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the process name used when no variable provides one
    pub fn with_fallback_process_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_process_name = Some(name.into());
        self
    }

    /// Environment variable consulted for a setting key
    pub fn var_name(&self, key: &str) -> String {
        let base = match ENV_VAR_MAP.get(key) {
            Some(var) => var.to_string(),
            None => key.replace(['.', '-'], "_").to_uppercase(),
        };
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), base),
            None => base,
        }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn setting(&self, key: &str) -> Option<String> {
        env::var(self.var_name(key)).ok().filter(|v| !v.is_empty())
    }

    fn fallback_process_name(&self) -> Option<String> {
        self.fallback_process_name.clone()
    }
}
