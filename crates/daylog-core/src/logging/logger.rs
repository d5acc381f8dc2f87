//! Logger façade
//!
//! Every severity has a plain form (`info`), a template form (`info_fmt`) and,
//! for Warn, Error and Fatal, a form that appends an error's details
//! (`error_err`). None of them ever fails or panics: write failures are
//! reported through `tracing` and otherwise dropped.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use super::appender::append_line;
use super::context::{LoggingContext, Shared};
use super::error::{LogError, LogResult};
use super::format::{current_thread_id, format_event};
use super::message::{extended_form, render_template, short_form};
use super::path::{resolve, LogFileKind};
use super::severity::Severity;

/// A logger bound to a logging context
///
/// The default logger comes from `LoggingContext::default_logger`; named
/// loggers from `LoggingContext::named_logger` or `Logger::named`. Loggers
/// hold no file handles, so they are cheap to clone and keep around.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    name: Option<String>,
}

impl Logger {
    /// Create a named logger
    ///
    /// The name is validated before anything touches the file system.
    pub fn named(context: &LoggingContext, name: &str) -> LogResult<Self> {
        if name.trim().is_empty() {
            return Err(LogError::configuration("logger name is required"));
        }
        Ok(Self::attach(context.shared().clone(), Some(name.to_string())))
    }

    /// Bind a logger to the shared state, preparing its directory and
    /// rotating a leftover oversized file
    pub(crate) fn attach(shared: Arc<Shared>, name: Option<String>) -> Self {
        let logger = Self { shared, name };

        let directory = logger.directory();
        if let Err(e) = fs::create_dir_all(&directory) {
            tracing::debug!(path = %directory.display(), error = %e, "could not create log directory");
        }

        let now = logger.shared.clock.now();
        let guard = logger.shared.write_lock.lock();
        if let Err(e) = logger
            .shared
            .rotation
            .check(&logger.path_at(now, LogFileKind::Main), now)
        {
            tracing::debug!(error = %e, "initial rotation check failed");
        }
        drop(guard);

        logger
    }

    /// Instance name, `None` for the default logger
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current log directory
    pub fn directory(&self) -> PathBuf {
        self.shared.config.log_directory()
    }

    /// Today's main log file for this logger
    pub fn file_path(&self) -> PathBuf {
        self.path_at(self.shared.clock.now(), LogFileKind::Main)
    }

    /// Today's error file for this logger
    pub fn error_file_path(&self) -> PathBuf {
        self.path_at(self.shared.clock.now(), LogFileKind::Error)
    }

    /// Whether debug events are currently recorded
    pub fn is_debug_enabled(&self) -> bool {
        self.shared.config.debug_enabled()
    }

    /// Record a plain message at any severity
    pub fn log(&self, severity: Severity, message: &str) {
        if severity == Severity::Debug && !self.is_debug_enabled() {
            return;
        }
        self.record(severity, message, None);
    }

    /// Technical detail for troubleshooting; dropped unless debug is enabled
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn debug_fmt(&self, template: &str, values: &[&dyn Display]) {
        if self.is_debug_enabled() {
            self.record_template(Severity::Debug, template, values);
        }
    }

    /// Normal operation
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn info_fmt(&self, template: &str, values: &[&dyn Display]) {
        self.record_template(Severity::Info, template, values);
    }

    /// Anomaly in a process that still completed
    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    pub fn warn_fmt(&self, template: &str, values: &[&dyn Display]) {
        self.record_template(Severity::Warn, template, values);
    }

    pub fn warn_err(&self, err: &dyn Error, template: &str, values: &[&dyn Display]) {
        self.record_error(Severity::Warn, err, template, values);
    }

    /// Failed operation; also mirrored into the error file
    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    pub fn error_fmt(&self, template: &str, values: &[&dyn Display]) {
        self.record_template(Severity::Error, template, values);
    }

    /// The main file gets the error's summary, the error file its full detail
    pub fn error_err(&self, err: &dyn Error, template: &str, values: &[&dyn Display]) {
        self.record_error(Severity::Error, err, template, values);
    }

    /// The application cannot continue; also mirrored into the error file
    pub fn fatal(&self, message: &str) {
        self.log(Severity::Fatal, message);
    }

    pub fn fatal_fmt(&self, template: &str, values: &[&dyn Display]) {
        self.record_template(Severity::Fatal, template, values);
    }

    pub fn fatal_err(&self, err: &dyn Error, template: &str, values: &[&dyn Display]) {
        self.record_error(Severity::Fatal, err, template, values);
    }

    fn record_template(&self, severity: Severity, template: &str, values: &[&dyn Display]) {
        match render_template(template, values) {
            Ok(message) => self.record(severity, &message, None),
            Err(e) => tracing::warn!(%severity, error = %e, "log event dropped"),
        }
    }

    fn record_error(
        &self,
        severity: Severity,
        err: &dyn Error,
        template: &str,
        values: &[&dyn Display],
    ) {
        match render_template(template, values) {
            Ok(message) => {
                let detail = severity
                    .is_mirrored()
                    .then(|| extended_form(&message, err));
                self.record(severity, &short_form(&message, err), detail.as_deref());
            }
            Err(e) => tracing::warn!(%severity, error = %e, "log event dropped"),
        }
    }

    fn record(&self, severity: Severity, message: &str, error_detail: Option<&str>) {
        if let Err(e) = self.write_event(severity, message, error_detail) {
            tracing::warn!(%severity, error = %e, "log write failed");
        }
    }

    /// Write one event under the context lock
    ///
    /// The main file always gets `message`. Error and Fatal events also go to
    /// the error file, as `error_detail` when given and as the main line
    /// otherwise. Every step is attempted even if an earlier one failed; the
    /// first failure is returned.
    pub(crate) fn write_event(
        &self,
        severity: Severity,
        message: &str,
        error_detail: Option<&str>,
    ) -> LogResult<()> {
        let shared = &*self.shared;
        let _guard = shared.write_lock.lock();

        let now = shared.clock.now();
        let thread_id = current_thread_id();
        let line = format_event(severity, now, thread_id, message);
        let mut outcome = Ok(());

        let main_path = self.path_at(now, LogFileKind::Main);
        keep_first(&mut outcome, shared.rotation.check(&main_path, now));
        keep_first(&mut outcome, append_line(&main_path, &line, shared.encoding));

        if severity.is_mirrored() {
            let error_path = self.path_at(now, LogFileKind::Error);
            let error_line = match error_detail {
                Some(detail) => format_event(severity, now, thread_id, detail),
                None => line,
            };
            keep_first(&mut outcome, shared.rotation.check(&error_path, now));
            keep_first(&mut outcome, append_line(&error_path, &error_line, shared.encoding));
            keep_first(&mut outcome, shared.rotation.check(&main_path, now));
        }

        outcome
    }

    fn path_at(&self, now: DateTime<Local>, kind: LogFileKind) -> PathBuf {
        let config = &self.shared.config;
        resolve(
            &config.log_directory(),
            now.date_naive(),
            &config.process_name(),
            self.name.as_deref(),
            kind,
        )
    }
}

fn keep_first<T>(outcome: &mut LogResult<()>, result: LogResult<T>) {
    if let Err(e) = result {
        if outcome.is_ok() {
            *outcome = Err(e);
        } else {
            tracing::debug!(error = %e, "additional write failure");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("file", &self.file_path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigProvider;
    use crate::logging::{FixedClock, TextEncoding, ROTATION_THRESHOLD};
    use std::fs::File;
    use std::io;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        dir: TempDir,
        config: Arc<MemoryConfigProvider>,
        context: LoggingContext,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let config = Arc::new(MemoryConfigProvider::new());
        config.set_directory(dir.path());
        config.set_process_name("svc");
        let context = LoggingContext::builder(config.clone())
            .clock(Arc::new(FixedClock::at(2024, 1, 1, 14, 2, 7).unwrap()))
            .build();
        Fixture { dir, config, context }
    }

    fn lines(path: &Path) -> Vec<String> {
        match fs::read_to_string(path) {
            Ok(content) => content
                .split_terminator("\r\n")
                .map(String::from)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn test_info_writes_one_line() {
        let fx = fixture();
        let log = fx.context.default_logger();
        log.info("started");

        let main = fx.dir.path().join("2024-01-01.svc.log");
        assert_eq!(log.file_path(), main);
        let content = fs::read_to_string(&main).unwrap();
        assert_eq!(content, format!("2024-01-01 14:02:07.000 [{:<5}] Info  - started\r\n", current_thread_id()));
        assert!(!log.error_file_path().exists());
    }

    #[test]
    fn test_one_main_line_per_call() {
        let fx = fixture();
        let log = fx.context.default_logger();
        log.info("a");
        log.warn("b");
        log.error("c");
        log.fatal("d");

        let main = lines(&log.file_path());
        assert_eq!(main.len(), 4);
        assert!(main[0].ends_with(" Info  - a"));
        assert!(main[1].ends_with(" Warn  - b"));
        assert!(main[2].ends_with(" Error - c"));
        assert!(main[3].ends_with(" Fatal - d"));
    }

    #[test]
    fn test_debug_gate() {
        let fx = fixture();
        let log = fx.context.default_logger();

        log.debug("x");
        log.debug_fmt("x {0}", &[&1]);
        assert!(!log.file_path().exists());

        fx.config.set_debug(true);
        log.debug("y");
        let main = lines(&log.file_path());
        assert_eq!(main.len(), 1);
        assert!(main[0].ends_with(" Debug - y"));
    }

    #[test]
    fn test_only_error_and_fatal_are_mirrored() {
        let fx = fixture();
        fx.config.set_debug(true);
        let log = fx.context.default_logger();

        log.debug("d");
        log.info("i");
        log.warn("w");
        assert!(!log.error_file_path().exists());

        log.error("e");
        log.fatal("f");
        let mirrored = lines(&log.error_file_path());
        assert_eq!(mirrored.len(), 2);
        assert!(mirrored[0].ends_with(" Error - e"));
        assert!(mirrored[1].ends_with(" Fatal - f"));
        assert_eq!(log.error_file_path(), fx.dir.path().join("2024-01-01.svc.err"));
    }

    #[test]
    fn test_error_with_details() {
        let fx = fixture();
        let log = fx.context.default_logger();
        let err = io::Error::new(io::ErrorKind::Other, "disk full");

        log.error_err(&err, "failed op {0}", &[&"X"]);

        let main = fs::read_to_string(log.file_path()).unwrap();
        assert!(main.ends_with(" Error - failed op X\r\ndisk full\r\n"));

        let mirrored = fs::read_to_string(log.error_file_path()).unwrap();
        assert!(mirrored.contains(" Error - failed op X\r\n"));
        assert!(mirrored.contains("disk full"));
        assert_ne!(main, mirrored);
    }

    #[test]
    fn test_fatal_and_warn_with_details() {
        let fx = fixture();
        let log = fx.context.default_logger();
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        log.warn_err(&err, "retrying {0}", &[&2]);
        assert!(!log.error_file_path().exists());

        log.fatal_err(&err, "giving up", &[]);
        let main = lines(&log.file_path());
        assert_eq!(main.len(), 4);
        assert!(main[0].ends_with(" Warn  - retrying 2"));
        assert_eq!(main[1], "denied");
        assert!(main[2].ends_with(" Fatal - giving up"));
        assert_eq!(main[3], "denied");

        let mirrored = fs::read_to_string(log.error_file_path()).unwrap();
        assert!(mirrored.contains(" Fatal - giving up\r\n"));
        assert!(mirrored.contains("PermissionDenied"));
    }

    #[test]
    fn test_template_failure_writes_nothing() {
        let fx = fixture();
        let log = fx.context.default_logger();

        log.info_fmt("missing {1}", &[&"a"]);
        log.error_fmt("bad {", &[]);
        assert!(!log.file_path().exists());
        assert!(!log.error_file_path().exists());

        log.info_fmt("{0} of {1}", &[&1, &2]);
        assert!(lines(&log.file_path())[0].ends_with(" Info  - 1 of 2"));
    }

    #[test]
    fn test_rotation_before_write() {
        let fx = fixture();
        let log = fx.context.default_logger();
        let main = log.file_path();
        File::create(&main).unwrap().set_len(ROTATION_THRESHOLD + 1).unwrap();

        log.warn("y");

        let rotated = fx.dir.path().join("2024-01-01.svc.log-14-02-07");
        assert_eq!(fs::metadata(&rotated).unwrap().len(), ROTATION_THRESHOLD + 1);
        let fresh = lines(&main);
        assert_eq!(fresh.len(), 1);
        assert!(fresh[0].ends_with(" Warn  - y"));
    }

    #[test]
    fn test_mirror_write_rechecks_main_file() {
        let fx = fixture();
        let log = fx.context.default_logger();
        let main = log.file_path();
        File::create(&main).unwrap().set_len(ROTATION_THRESHOLD - 5).unwrap();

        // Not oversized before the append, oversized after it
        log.error("crossing the threshold");

        assert!(!main.exists());
        let rotated = fx.dir.path().join("2024-01-01.svc.log-14-02-07");
        assert!(fs::metadata(&rotated).unwrap().len() > ROTATION_THRESHOLD);
        assert_eq!(lines(&log.error_file_path()).len(), 1);
    }

    #[test]
    fn test_leftover_oversized_file_is_rotated_on_attach() {
        let fx = fixture();
        let path = fx.dir.path().join("2024-01-01.svc.jobs.log");
        File::create(&path).unwrap().set_len(ROTATION_THRESHOLD + 1).unwrap();

        let jobs = fx.context.named_logger("jobs").unwrap();
        assert_eq!(jobs.file_path(), path);
        assert!(!path.exists());
        assert!(fx.dir.path().join("2024-01-01.svc.jobs.log-14-02-07").exists());
    }

    #[test]
    fn test_named_logger_validation() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        let config = Arc::new(MemoryConfigProvider::new());
        config.set_directory(&logs);
        let context = LoggingContext::new(config);

        for name in ["", "   ", "\t"] {
            let err = context.named_logger(name).unwrap_err();
            assert!(matches!(err, LogError::Configuration(_)));
        }
        // Rejected before any file system access
        assert!(!logs.exists());

        let named = Logger::named(&context, "jobs").unwrap();
        assert_eq!(named.name(), Some("jobs"));
        assert!(logs.is_dir());
    }

    #[test]
    fn test_loggers_converge_on_same_file() {
        let fx = fixture();
        let a = fx.context.named_logger("jobs").unwrap();
        let b = fx.context.named_logger("jobs").unwrap();
        assert_eq!(a.file_path(), b.file_path());
        assert_eq!(a.file_path(), fx.dir.path().join("2024-01-01.svc.jobs.log"));
        assert_ne!(a.file_path(), fx.context.default_logger().file_path());

        a.info("from a");
        b.info("from b");
        assert_eq!(lines(&a.file_path()).len(), 2);
    }

    #[test]
    fn test_configuration_is_read_per_call() {
        let fx = fixture();
        let log = fx.context.default_logger();
        log.info("one");

        fx.config.set_process_name("other");
        log.info("two");

        assert_eq!(lines(&fx.dir.path().join("2024-01-01.svc.log")).len(), 1);
        assert_eq!(lines(&fx.dir.path().join("2024-01-01.other.log")).len(), 1);
        assert_eq!(log.file_path(), fx.dir.path().join("2024-01-01.other.log"));
    }

    #[test]
    fn test_write_failures_are_reported_internally() {
        let fx = fixture();
        let log = fx.context.default_logger().clone();
        fx.config.set_directory(fx.dir.path().join("gone"));

        let result = log.write_event(Severity::Error, "lost", None);
        assert!(matches!(result, Err(LogError::FileSystem { .. })));

        // The public surface swallows the same failure
        log.error("lost");
        log.fatal_err(&io::Error::new(io::ErrorKind::Other, "x"), "lost", &[]);
        assert_eq!(log.directory(), fx.dir.path().join("gone"));
    }

    #[test]
    fn test_mirror_is_attempted_when_main_fails() {
        let fx = fixture();
        let log = fx.context.default_logger();
        // A directory where the main file should be makes its append fail
        fs::create_dir(log.file_path()).unwrap();

        assert!(log.write_event(Severity::Error, "still mirrored", None).is_err());
        let mirrored = lines(&log.error_file_path());
        assert_eq!(mirrored.len(), 1);
        assert!(mirrored[0].ends_with(" Error - still mirrored"));
    }

    #[test]
    fn test_concurrent_writes_are_not_interleaved() {
        const THREADS: usize = 8;
        const CALLS: usize = 250;

        let fx = fixture();
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let logger = fx.context.named_logger("load").unwrap();
                std::thread::spawn(move || {
                    for i in 0..CALLS {
                        logger.info_fmt("thread {0} call {1} {2}", &[&t, &i, &"payload".repeat(20)]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let path = fx.dir.path().join("2024-01-01.svc.load.log");
        let written = lines(&path);
        assert_eq!(written.len(), THREADS * CALLS);
        for line in &written {
            assert!(line.starts_with("2024-01-01 14:02:07.000 ["), "malformed: {line}");
            assert!(line.contains("] Info  - thread "), "malformed: {line}");
            assert!(line.ends_with(&"payload".repeat(20)), "truncated: {line}");
        }
    }

    #[test]
    fn test_windows_1252_output() {
        let dir = tempdir().unwrap();
        let config = Arc::new(MemoryConfigProvider::new());
        config.set_directory(dir.path());
        config.set_process_name("svc");
        let context = LoggingContext::builder(config)
            .encoding(TextEncoding::Windows1252)
            .build();

        let log = context.default_logger();
        log.info("señal");
        let bytes = fs::read(log.file_path()).unwrap();
        assert!(bytes.ends_with(b"se\xF1al\r\n"));
    }
}
