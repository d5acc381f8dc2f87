//! Per-day file logging
//!
//! Events go to `<dir>/<YYYY-MM-DD>.<process>[.<name>].log`; Error and Fatal
//! events are mirrored into the matching `.err` file. Files larger than
//! `ROTATION_THRESHOLD` bytes are renamed with a `-HH-MM-SS` suffix before the
//! next append. Every write across every logger of a `LoggingContext` runs
//! under one lock, and no write failure ever reaches the caller.

mod severity;
mod error;
mod clock;
mod message;
mod format;
mod path;
mod rotation;
mod appender;
mod context;
mod logger;

pub use severity::Severity;
pub use error::{LogError, LogResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use message::{extended_form, render_template, short_form};
pub use format::{current_thread_id, format_event, LINE_TERMINATOR};
pub use path::{resolve, LogFileKind};
pub use rotation::{rotated_path, RotationGuard, ROTATION_THRESHOLD};
pub use appender::{append_line, TextEncoding};
pub use context::{LoggingContext, LoggingContextBuilder};
pub use logger::Logger;

/// Log a debug message with `format!` arguments
///
/// The message is only formatted when debug is enabled.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {{
        let logger = &$logger;
        if logger.is_debug_enabled() {
            logger.debug(&format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)*) => {
        $logger.fatal(&format!($($arg)*))
    };
}
