//! Size-triggered rotation
//!
//! Once a file grows past the threshold it is renamed to
//! `<path>-<HH>-<MM>-<SS>` (the rotation moment) and the next append starts a
//! fresh file at the original path. Rotated files are never cleaned up here.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::error::{LogError, LogResult};

/// Size in bytes above which a file is rotated
pub const ROTATION_THRESHOLD: u64 = 30_000_000;

/// Renames oversized log files out of the way
#[derive(Debug, Clone, Copy)]
pub struct RotationGuard {
    threshold: u64,
}

impl Default for RotationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationGuard {
    /// Guard using the standard threshold
    pub fn new() -> Self {
        Self {
            threshold: ROTATION_THRESHOLD,
        }
    }

    /// Guard with a custom threshold
    pub fn with_threshold(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Rotate `path` if it is larger than the threshold
    ///
    /// Returns the new name of the rotated file, or `None` if nothing was done.
    /// A missing file is not an error.
    pub fn check(&self, path: &Path, now: DateTime<Local>) -> LogResult<Option<PathBuf>> {
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LogError::file_system(path, e)),
        };

        if size <= self.threshold {
            return Ok(None);
        }

        let target = rotated_path(path, now);
        if target.exists() {
            tracing::debug!(from = %path.display(), to = %target.display(), "rotation target taken, keeping current file");
            return Ok(None);
        }
        fs::rename(path, &target).map_err(|e| LogError::file_system(path, e))?;
        tracing::debug!(from = %path.display(), to = %target.display(), size, "rotated log file");
        Ok(Some(target))
    }
}

/// Name a file receives when rotated at `now`
pub fn rotated_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(now.format("-%H-%M-%S").to_string());
    PathBuf::from(name)
}
