//! Writing output lines to a target file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::encoding::TextEncoding;
use crate::error::{IngestError, Result};

/// Line terminator of the host platform, written after every line.
pub const LINE_TERMINATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

// Checked against the file name only; `/` never survives `Path::file_name`.
const ILLEGAL_FILE_CHARACTERS: [char; 5] = ['*', '?', '<', '>', '|'];

/// Outcome of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub lines_written: usize,
    pub bytes_written: usize,
    /// Some characters could not be represented in the target encoding.
    pub had_unmappable: bool,
}

/// Returns true when the file name part of a path contains characters that
/// are not allowed in file names.
pub fn has_illegal_file_characters(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(ILLEGAL_FILE_CHARACTERS))
}

/// Encodes the lines and writes them to `path`, replacing any existing file.
///
/// Every line, including the last, is followed by [`LINE_TERMINATOR`].
pub fn write_lines(path: &Path, lines: &[String], encoding: &TextEncoding) -> Result<WriteSummary> {
    let mut text = String::with_capacity(lines.iter().map(|line| line.len() + 2).sum());
    for line in lines {
        text.push_str(line);
        text.push_str(LINE_TERMINATOR);
    }
    let (bytes, had_unmappable) = encoding.encode(&text);

    std::fs::write(path, &bytes).map_err(|e| classify_write_error(path, e))?;

    tracing::debug!(
        path = %path.display(),
        encoding = encoding.name(),
        lines = lines.len(),
        bytes = bytes.len(),
        "wrote target file"
    );

    Ok(WriteSummary {
        lines_written: lines.len(),
        bytes_written: bytes.len(),
        had_unmappable,
    })
}

fn classify_write_error(path: &Path, error: std::io::Error) -> IngestError {
    // Illegal names are only reported once the write actually failed.
    if has_illegal_file_characters(path) {
        return IngestError::IllegalFileName {
            path: path.to_path_buf(),
        };
    }
    let directory = parent_directory(path);
    match error.kind() {
        ErrorKind::NotFound => IngestError::DirectoryNotFound { path: directory },
        ErrorKind::PermissionDenied => IngestError::Unauthorized { path: directory },
        _ => IngestError::FileWrite {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

fn parent_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
