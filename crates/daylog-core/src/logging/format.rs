//! Event line formatting
//!
//! `2024-01-01 14:02:07.123 [3    ] Info  - started\r\n`
//!
//! The line terminator is always CRLF so existing log tooling keeps working
//! regardless of the host platform.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

use super::severity::Severity;

/// Event line terminator
pub const LINE_TERMINATOR: &str = "\r\n";

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Small per-thread identifier, assigned on first use and stable for the
/// lifetime of the thread
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

/// Format one event line
pub fn format_event(
    severity: Severity,
    timestamp: DateTime<Local>,
    thread_id: u64,
    message: &str,
) -> String {
    format!(
        "{} [{:<5}] {:<5} - {}{}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        thread_id,
        severity,
        message,
        LINE_TERMINATOR
    )
}
