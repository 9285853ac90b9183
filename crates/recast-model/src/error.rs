use thiserror::Error;

use crate::ExitCode;

/// Errors raised while parsing a selection pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A comma separated entry was not an integer.
    #[error("error in pattern '{pattern}': '{token}' is not a column number")]
    InvalidToken { pattern: String, token: String },
}

impl PatternError {
    /// Exit classification for a rejected pattern.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::InvalidFields
    }
}
