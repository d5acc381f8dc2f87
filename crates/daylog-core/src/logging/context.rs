//! Logging context shared by every logger of a process
//!
//! Build one `LoggingContext` at startup and hand it (or loggers created from
//! it) to the rest of the application. All loggers of a context serialize
//! their writes through the same lock.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use super::appender::TextEncoding;
use super::clock::{Clock, SystemClock};
use super::error::LogResult;
use super::logger::Logger;
use super::rotation::RotationGuard;
use crate::config::{ConfigProvider, EnvConfigProvider};

/// State every logger of a context points at
pub(crate) struct Shared {
    pub(crate) config: Arc<dyn ConfigProvider>,
    pub(crate) write_lock: Mutex<()>,
    pub(crate) encoding: TextEncoding,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rotation: RotationGuard,
}

/// Process-wide logging context
///
/// # Example
///
/// ```no_run
/// use daylog_core::config::EnvConfigProvider;
/// use daylog_core::logging::LoggingContext;
/// use std::sync::Arc;
///
/// let config = EnvConfigProvider::new().with_fallback_process_name(env!("CARGO_PKG_NAME"));
/// let context = LoggingContext::new(Arc::new(config));
///
/// context.default_logger().info("started");
///
/// let jobs = context.named_logger("jobs").expect("valid logger name");
/// jobs.warn_fmt("queue depth {0} over limit", &[&120]);
/// ```
#[derive(Clone)]
pub struct LoggingContext {
    shared: Arc<Shared>,
    default_logger: Arc<OnceCell<Logger>>,
}

impl LoggingContext {
    /// Context with default encoding and the system clock
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self::builder(config).build()
    }

    /// Context configured from environment variables
    ///
    /// `process_name` is used when no variable names the process.
    pub fn from_env(process_name: impl Into<String>) -> Self {
        Self::new(Arc::new(
            EnvConfigProvider::new().with_fallback_process_name(process_name),
        ))
    }

    pub fn builder(config: Arc<dyn ConfigProvider>) -> LoggingContextBuilder {
        LoggingContextBuilder::new(config)
    }

    /// The application-wide logger, created on first use
    ///
    /// Creation makes sure the log directory exists; failing to create it is
    /// not an error.
    pub fn default_logger(&self) -> &Logger {
        self.default_logger
            .get_or_init(|| Logger::attach(self.shared.clone(), None))
    }

    /// A logger writing to its own `<date>.<process>.<name>.*` files
    ///
    /// Fails if `name` is empty or whitespace-only.
    pub fn named_logger(&self, name: &str) -> LogResult<Logger> {
        Logger::named(self, name)
    }

    pub fn config(&self) -> &Arc<dyn ConfigProvider> {
        &self.shared.config
    }

    pub fn encoding(&self) -> TextEncoding {
        self.shared.encoding
    }

    /// Current log directory
    pub fn directory(&self) -> PathBuf {
        self.shared.config.log_directory()
    }

    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("encoding", &self.shared.encoding)
            .field("rotation", &self.shared.rotation)
            .field("default_logger", &self.default_logger.get().is_some())
            .finish()
    }
}

/// Builder for `LoggingContext`
pub struct LoggingContextBuilder {
    config: Arc<dyn ConfigProvider>,
    encoding: TextEncoding,
    clock: Arc<dyn Clock>,
}

impl LoggingContextBuilder {
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            config,
            encoding: TextEncoding::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Byte encoding of written lines (UTF-8 unless set)
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Time source (the system clock unless set)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> LoggingContext {
        LoggingContext {
            shared: Arc::new(Shared {
                config: self.config,
                write_lock: Mutex::new(()),
                encoding: self.encoding,
                clock: self.clock,
                rotation: RotationGuard::new(),
            }),
            default_logger: Arc::new(OnceCell::new()),
        }
    }
}
