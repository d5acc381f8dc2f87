//! Log file path resolution

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Kind of file a logger writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFileKind {
    /// Main log file, every recorded event
    Main,
    /// Error mirror file, Error and Fatal events only
    Error,
}

impl LogFileKind {
    pub fn extension(&self) -> &'static str {
        match self {
            LogFileKind::Main => "log",
            LogFileKind::Error => "err",
        }
    }
}

/// Path of a log file
///
/// - default logger: `<dir>/<YYYY-MM-DD>.<process>.<ext>`
/// - named logger: `<dir>/<YYYY-MM-DD>.<process>.<name>.<ext>`
///
/// An empty instance name is the default logger.
pub fn resolve(
    directory: &Path,
    date: NaiveDate,
    process_name: &str,
    instance_name: Option<&str>,
    kind: LogFileKind,
) -> PathBuf {
    let date = date.format("%Y-%m-%d");
    let file_name = match instance_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("{}.{}.{}.{}", date, process_name, name, kind.extension()),
        None => format!("{}.{}.{}", date, process_name, kind.extension()),
    };
    directory.join(file_name)
}
