//! Configuration provider trait

use std::path::PathBuf;

/// Setting that gates debug events
pub const DEBUG_KEY: &str = "logger.debug";

/// Application name, preferred source for the process name
pub const APPLICATION_NAME_KEY: &str = "application.name";

/// Explicit logger process name
pub const PROCESS_KEY: &str = "logger.process";

/// Root directory for every log file
pub const DIRECTORY_KEY: &str = "logger.directory";

/// First characters (case-insensitive) that switch debug events on
const AFFIRMATIVE_PREFIXES: &[char] = &['s', 'y', 't', '1'];

/// Configuration provider abstraction
///
/// Implementors only answer raw lookups; the resolution rules live in the
/// provided methods so every source behaves the same way. Nothing here is
/// cached: each call goes back to the source, which is what makes a running
/// logger pick up changes on its next write.
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory, settable at runtime
/// - `EnvConfigProvider`: Environment variables
/// - `FileConfigProvider`: Flat YAML settings file
/// - `ChainConfigProvider`: Ordered fallback over other providers
pub trait ConfigProvider: Send + Sync {
    /// Look up a raw setting by key
    fn setting(&self, key: &str) -> Option<String>;

    /// Process name used when no setting names one
    ///
    /// Usually supplied at startup from build metadata, e.g. `env!("CARGO_PKG_NAME")`.
    fn fallback_process_name(&self) -> Option<String> {
        None
    }

    /// Whether debug events are recorded
    fn debug_enabled(&self) -> bool {
        self.setting(DEBUG_KEY)
            .and_then(|value| value.trim_start().chars().next())
            .map(|c| AFFIRMATIVE_PREFIXES.contains(&c.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// Process name used in file names
    fn process_name(&self) -> String {
        self.setting(APPLICATION_NAME_KEY)
            .or_else(|| self.setting(PROCESS_KEY))
            .or_else(|| self.fallback_process_name())
            .unwrap_or_default()
    }

    /// Directory holding every log file
    fn log_directory(&self) -> PathBuf {
        match self.setting(DIRECTORY_KEY) {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_log_directory(),
        }
    }
}

/// Directory used when none is configured
#[cfg(windows)]
pub fn default_log_directory() -> PathBuf {
    PathBuf::from(r"D:\Logs")
}

/// Directory used when none is configured
#[cfg(not(windows))]
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("logs")
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
