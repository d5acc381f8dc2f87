//! Scoped open-append-close writes

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::error::{LogError, LogResult};

/// Byte encoding of the text written to log files
///
/// `Windows1252` keeps byte-exact compatibility with files produced by older
/// tooling that expects that code page. Characters outside it are written as
/// HTML numeric character references (`&#NNNN;`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Windows1252,
}

impl TextEncoding {
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            TextEncoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            TextEncoding::Windows1252 => {
                let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);
                bytes
            }
        }
    }
}

/// Append `line` to the file at `path`, creating the file if needed
///
/// The handle is opened for this call only and closed on every exit path.
/// Missing parent directories are not created.
pub fn append_line(path: &Path, line: &str, encoding: TextEncoding) -> LogResult<()> {
    let bytes = encoding.encode(line);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::file_system(path, e))?;
    file.write_all(&bytes)
        .map_err(|e| LogError::file_system(path, e))
}
