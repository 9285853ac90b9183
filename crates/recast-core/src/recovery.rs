//! Recovery from malformed lines.

use recast_model::{Delimiter, Record, Recovery, RecoveryPolicy};

use crate::diagnostics::Reporter;
use crate::error::ProcessError;
use crate::parser::clean_field;

/// Parse failure detected at one field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    BadData,
    MissingField,
}

impl Fault {
    /// Recovery configured for this kind of failure.
    pub fn recovery(self, policy: &RecoveryPolicy) -> Recovery {
        match self {
            Fault::BadData => policy.bad_data,
            Fault::MissingField => policy.missing_field,
        }
    }

    /// Fatal error for the abort policy.
    pub fn into_error(self, line: usize, field: usize, expected: usize, text: &str) -> ProcessError {
        match self {
            Fault::BadData => ProcessError::BadData {
                line,
                field,
                text: text.to_string(),
            },
            Fault::MissingField => ProcessError::MissingField {
                line,
                field,
                expected,
                text: text.to_string(),
            },
        }
    }
}

/// Rebuilds a record from a plain split of the raw line.
///
/// Values extracted so far are discarded. Quote characters are removed from
/// every segment. The record ends up with as many fields as the line has
/// segments, which can be fewer than `column_count`; each column past the
/// end of the split is reported as skipped.
pub fn fix_record(
    record: &mut Record,
    raw: &str,
    line: usize,
    delimiter: &Delimiter,
    column_count: usize,
    reporter: &mut Reporter<'_>,
) {
    record.clear_fields();

    let segments: Vec<&str> = raw.split(delimiter.as_str()).collect();
    let found = segments.len().saturating_sub(1);
    let expected = column_count.saturating_sub(1);

    let shape = if segments.len() > column_count {
        format!("too many delimiters ({found}, expected {expected})")
    } else if segments.len() < column_count {
        format!("too few delimiters ({found}, expected {expected})")
    } else {
        "delimiter count matches".to_string()
    };
    reporter.warning(format!(
        "Fixing line {line}, {shape}. Also removing quotes (\")\nLine: {raw}"
    ));

    for segment in &segments {
        record.push_field(clean_field(&segment.replace('"', "")));
    }

    for field in segments.len()..column_count {
        reporter.warning(format!(
            "Skipped field {field} on line {line}: the line has only {} field(s)",
            segments.len()
        ));
    }

    tracing::debug!(line, fields = record.len(), "fixed line");
}
