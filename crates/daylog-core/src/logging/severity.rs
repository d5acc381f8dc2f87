//! Event severity

/// Severity of a log event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Technical detail for troubleshooting; only recorded when debug is enabled
    Debug,
    /// Normal operation
    Info,
    /// A process completed but something was off (assumed defaults, slow run)
    Warn,
    /// A single operation failed while the application keeps running
    Error,
    /// The application cannot continue processing
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }

    /// Whether events of this severity are mirrored into the error file
    pub fn is_mirrored(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
