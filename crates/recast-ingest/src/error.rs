//! Error types for file access.

use std::path::PathBuf;

use recast_model::ExitCode;
use thiserror::Error;

/// Errors that can occur while reading or writing files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors ===
    /// Source file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Source file exists but could not be read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file metadata.
    #[error("failed to read metadata of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// Encoding name or label is not known.
    #[error("error parsing encoding {name}")]
    InvalidEncoding { name: String },

    // === Target Errors ===
    /// Directory of the target file does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Target directory is not writable.
    #[error("can't write to folder, unauthorized: {path}")]
    Unauthorized { path: PathBuf },

    /// Target file name contains characters that are not allowed in file names.
    #[error("can't save file, illegal characters in file name: {path}")]
    IllegalFileName { path: PathBuf },

    /// Any other failure while writing the target file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Exit classification for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            IngestError::FileNotFound { .. } => ExitCode::SourceFileNotFound,
            IngestError::FileRead { .. } | IngestError::Metadata { .. } => {
                ExitCode::SourceFileParseError
            }
            IngestError::InvalidEncoding { .. } => ExitCode::InvalidEncoding,
            IngestError::DirectoryNotFound { .. } => ExitCode::TargetDirectoryNotFound,
            IngestError::Unauthorized { .. } => ExitCode::TargetUnauthorized,
            IngestError::IllegalFileName { .. } | IngestError::FileWrite { .. } => {
                ExitCode::TargetFileError
            }
        }
    }
}

/// Result type for file access operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");
    }

    #[test]
    fn test_exit_codes() {
        let missing = IngestError::DirectoryNotFound {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(missing.exit_code(), ExitCode::TargetDirectoryNotFound);

        let encoding = IngestError::InvalidEncoding {
            name: "klingon".to_string(),
        };
        assert_eq!(encoding.exit_code(), ExitCode::InvalidEncoding);

        let denied = IngestError::Unauthorized {
            path: PathBuf::from("/root"),
        };
        assert_eq!(denied.exit_code(), ExitCode::TargetUnauthorized);
    }
}
