//! Configuration provider abstractions
//!
//! Three values drive the logger: the debug flag, the process name and the
//! log directory. They are resolved on every access from one of:
//! - `MemoryConfigProvider`: In-memory, for tests and runtime updates
//! - `EnvConfigProvider`: Environment variables
//! - `FileConfigProvider`: Flat YAML settings file
//! - `ChainConfigProvider`: Ordered fallback over the above

mod traits;
mod memory;
mod env;
mod file;
mod chain;

pub use traits::{
    default_log_directory, ConfigError, ConfigProvider, ConfigResult, APPLICATION_NAME_KEY,
    DEBUG_KEY, DIRECTORY_KEY, PROCESS_KEY,
};
pub use memory::MemoryConfigProvider;
pub use env::EnvConfigProvider;
pub use file::{FileConfigProvider, SettingsFile};
pub use chain::ChainConfigProvider;
