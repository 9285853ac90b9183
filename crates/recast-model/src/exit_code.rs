//! Process exit classifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome classification reported to the host when processing ends.
///
/// The numeric values are stable and double as the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    InfoShown = 1,
    SourceFileNotFound = 2,
    SourceFileParseError = 3,
    TargetFileError = 4,
    InvalidEncoding = 5,
    InvalidFields = 6,
    InvalidArgument = 7,
    TargetUnauthorized = 8,
    TargetDirectoryNotFound = 9,
    UnknownError = 10,
    /// Source file modification time is older than the configured limit.
    SourceFileOutdated = 11,
}

impl ExitCode {
    /// Every exit code in numeric order.
    pub const ALL: [ExitCode; 12] = [
        ExitCode::Success,
        ExitCode::InfoShown,
        ExitCode::SourceFileNotFound,
        ExitCode::SourceFileParseError,
        ExitCode::TargetFileError,
        ExitCode::InvalidEncoding,
        ExitCode::InvalidFields,
        ExitCode::InvalidArgument,
        ExitCode::TargetUnauthorized,
        ExitCode::TargetDirectoryNotFound,
        ExitCode::UnknownError,
        ExitCode::SourceFileOutdated,
    ];

    /// Numeric process exit status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for codes that signal a failure.
    pub fn is_failure(self) -> bool {
        self.code() > ExitCode::InfoShown.code()
    }

    pub fn name(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::InfoShown => "InfoShown",
            ExitCode::SourceFileNotFound => "SourceFileNotFound",
            ExitCode::SourceFileParseError => "SourceFileParseError",
            ExitCode::TargetFileError => "TargetFileError",
            ExitCode::InvalidEncoding => "InvalidEncoding",
            ExitCode::InvalidFields => "InvalidFields",
            ExitCode::InvalidArgument => "InvalidArgument",
            ExitCode::TargetUnauthorized => "TargetUnauthorized",
            ExitCode::TargetDirectoryNotFound => "TargetDirectoryNotFound",
            ExitCode::UnknownError => "UnknownError",
            ExitCode::SourceFileOutdated => "SourceFileOutdated",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
