//! Daylog Core
//!
//! Embeddable file logging: severity-tagged events are appended to per-day,
//! per-process log files, Error and Fatal events are mirrored into a separate
//! error file, and files are rotated once they grow past a size threshold.
//! Logging never fails back into the host: write failures turn log calls into
//! no-ops.
//!
//! ```rust,no_run
//! use daylog_core::config::EnvConfigProvider;
//! use daylog_core::logging::LoggingContext;
//! use std::sync::Arc;
//!
//! let context = LoggingContext::new(Arc::new(
//!     EnvConfigProvider::new().with_fallback_process_name(env!("CARGO_PKG_NAME")),
//! ));
//!
//! let log = context.default_logger();
//! log.info("started");
//!
//! if let Err(err) = std::fs::read("settings.bin") {
//!     log.error_err(&err, "could not load {0}", &[&"settings.bin"]);
//! }
//! ```

pub mod logging;
pub mod config;
pub mod convert;

pub use logging::{
    LogError, LogResult, Logger, LoggingContext, LoggingContextBuilder, Severity, TextEncoding,
};

pub use config::{
    ChainConfigProvider, ConfigProvider, EnvConfigProvider, FileConfigProvider,
    MemoryConfigProvider,
};
