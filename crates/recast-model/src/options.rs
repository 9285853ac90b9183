//! Configuration options for loading and writing delimited files.

use serde::{Deserialize, Serialize};

use crate::{Delimiter, DelimiterSetting};

/// Recovery applied when a line fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recovery {
    /// Report a fatal parse error and stop loading.
    Abort,
    /// Suppress the error and keep the parser's default values.
    Ignore,
    /// Re-split the raw line without quote handling.
    Fix,
}

/// Recovery resolved per failure condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPolicy {
    /// Unterminated or misplaced quotes.
    pub bad_data: Recovery,
    /// Fewer delimited segments than the resolved column count.
    pub missing_field: Recovery,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            bad_data: Recovery::Abort,
            missing_field: Recovery::Abort,
        }
    }
}

/// Resolved policy plus the warnings produced while reconciling flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyResolution {
    pub policy: RecoveryPolicy,
    pub warnings: Vec<String>,
}

/// Options controlling how a file is read, repaired and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Delimiter used to split source lines.
    pub delimiter_read: DelimiterSetting,
    /// Delimiter used to join output fields.
    pub delimiter_write: Delimiter,
    /// Expected fields per record. 0 detects the count from the first lines.
    pub column_count: usize,
    /// Row 0 of the source holds column names.
    pub file_has_headers: bool,
    /// Replace (or synthesize) the header row.
    pub replace_headers: bool,
    /// Replacement header names, split by the read delimiter. Empty generates names.
    pub new_headers: String,
    /// Continue past malformed quoting using the parser's lenient values.
    pub ignore_bad_data: bool,
    /// Continue past short lines, filling absent fields with empty values.
    pub ignore_missing_field: bool,
    /// Repair malformed lines by re-splitting the raw text.
    pub fix_bad_data: bool,
    /// Silence informational messages.
    pub quiet: bool,
    /// Silence warnings.
    pub suppress_warnings: bool,
    /// Silence errors.
    pub suppress_errors: bool,
    /// Ask the host to wait for confirmation before exiting.
    pub pause: bool,
    /// Ask the host to terminate the process on fatal errors.
    pub exit_on_error: bool,
    /// Write a byte-order mark for UTF-8 targets.
    pub byte_order_mark: bool,
    /// Number of records shown by a preview.
    pub example_lines: usize,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            delimiter_read: DelimiterSetting::Auto,
            delimiter_write: Delimiter::comma(),
            column_count: 0,
            file_has_headers: true,
            replace_headers: false,
            new_headers: String::new(),
            ignore_bad_data: false,
            ignore_missing_field: false,
            fix_bad_data: false,
            quiet: false,
            suppress_warnings: false,
            suppress_errors: false,
            pause: false,
            exit_on_error: true,
            byte_order_mark: false,
            example_lines: 5,
        }
    }
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter_read(mut self, delimiter: DelimiterSetting) -> Self {
        self.delimiter_read = delimiter;
        self
    }

    #[must_use]
    pub fn with_delimiter_write(mut self, delimiter: Delimiter) -> Self {
        self.delimiter_write = delimiter;
        self
    }

    #[must_use]
    pub fn with_column_count(mut self, count: usize) -> Self {
        self.column_count = count;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, file_has_headers: bool) -> Self {
        self.file_has_headers = file_has_headers;
        self
    }

    /// Requests header replacement; empty text generates `Column n` names.
    #[must_use]
    pub fn with_new_headers(mut self, names: impl Into<String>) -> Self {
        self.replace_headers = true;
        self.new_headers = names.into();
        self
    }

    #[must_use]
    pub fn with_ignore_bad_data(mut self, enable: bool) -> Self {
        self.ignore_bad_data = enable;
        self
    }

    #[must_use]
    pub fn with_ignore_missing_field(mut self, enable: bool) -> Self {
        self.ignore_missing_field = enable;
        self
    }

    #[must_use]
    pub fn with_fix_bad_data(mut self, enable: bool) -> Self {
        self.fix_bad_data = enable;
        self
    }

    #[must_use]
    pub fn with_quiet(mut self, enable: bool) -> Self {
        self.quiet = enable;
        self
    }

    #[must_use]
    pub fn with_exit_on_error(mut self, enable: bool) -> Self {
        self.exit_on_error = enable;
        self
    }

    /// Reconciles the bad-data flags into one recovery mode per condition.
    ///
    /// Fixing takes precedence over ignoring: when both are requested the
    /// ignore flag is switched off and a warning is returned.
    pub fn resolve_policy(&mut self) -> PolicyResolution {
        let mut warnings = Vec::new();
        if self.fix_bad_data && self.ignore_bad_data {
            warnings.push(
                "Fix bad data requires ignore bad data to be off. Disabling the ignore option"
                    .to_string(),
            );
            self.ignore_bad_data = false;
        }
        if self.fix_bad_data && self.ignore_missing_field {
            warnings.push(
                "Fix bad data requires ignore missing fields to be off. Disabling the ignore option"
                    .to_string(),
            );
            self.ignore_missing_field = false;
        }
        let pick = |ignore: bool| {
            if self.fix_bad_data {
                Recovery::Fix
            } else if ignore {
                Recovery::Ignore
            } else {
                Recovery::Abort
            }
        };
        let policy = RecoveryPolicy {
            bad_data: pick(self.ignore_bad_data),
            missing_field: pick(self.ignore_missing_field),
        };
        PolicyResolution { policy, warnings }
    }
}
