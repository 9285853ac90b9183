//! Error types for the record engine.

use std::path::PathBuf;

use recast_ingest::IngestError;
use recast_model::{ExitCode, PatternError};
use thiserror::Error;

/// Fatal conditions raised while loading, projecting or saving records.
#[derive(Debug, Error)]
pub enum ProcessError {
    // === Source Errors ===
    /// Reading or decoding the source failed.
    #[error(transparent)]
    Source(IngestError),

    /// Source file is older than the configured age limit.
    #[error("source file {path} is {days} days old, the limit is {limit} days")]
    SourceOutdated { path: PathBuf, days: u64, limit: u64 },

    // === Parse Errors ===
    /// Unterminated or misplaced quotes on a line.
    #[error(
        "Bad Data on line {line}, field {field}\nLine: {text}\nPlease check if correct delimiters are set (, or ;) and all \" quotes are closed out."
    )]
    BadData {
        line: usize,
        field: usize,
        text: String,
    },

    /// Line has fewer fields than the resolved column count.
    #[error(
        "Missing Field on line {line}, field {field}. Expected number of fields: {expected}\nLine: {text}"
    )]
    MissingField {
        line: usize,
        field: usize,
        expected: usize,
        text: String,
    },

    // === Pattern Errors ===
    #[error(transparent)]
    Pattern(#[from] PatternError),

    // === Target Errors ===
    /// Encoding of the target could not be resolved.
    #[error(transparent)]
    TargetEncoding(IngestError),

    /// Writing the target file failed.
    #[error("error saving to file: {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: IngestError,
    },
}

impl ProcessError {
    /// Exit classification for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ProcessError::Source(source) | ProcessError::TargetEncoding(source) => {
                source.exit_code()
            }
            ProcessError::Save { source, .. } => source.exit_code(),
            ProcessError::SourceOutdated { .. } => ExitCode::SourceFileOutdated,
            ProcessError::BadData { .. } | ProcessError::MissingField { .. } => {
                ExitCode::SourceFileParseError
            }
            ProcessError::Pattern(error) => error.exit_code(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ProcessError>;
