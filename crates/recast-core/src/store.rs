//! Building the record set from decoded lines.

use recast_model::{Delimiter, Record, RecordSet, Recovery, RecoveryPolicy};

use crate::diagnostics::Reporter;
use crate::error::Result;
use crate::parser::{clean_field, parse_line};
use crate::recovery::{Fault, fix_record};

/// Shape every line is parsed against during one load.
#[derive(Debug, Clone, Copy)]
pub struct LineLayout<'a> {
    pub delimiter: &'a Delimiter,
    pub column_count: usize,
    pub policy: RecoveryPolicy,
}

/// Parses every non-blank line into a record.
///
/// Blank lines produce no record. Each record remembers the physical line it
/// came from, which is also the line number used in diagnostics.
pub fn read_records(
    lines: &[String],
    layout: LineLayout<'_>,
    reporter: &mut Reporter<'_>,
) -> Result<RecordSet> {
    let mut records = RecordSet::new();
    for (line, text) in lines.iter().enumerate() {
        if text.trim().is_empty() {
            tracing::debug!(line, "skipping blank line");
            continue;
        }
        records.push(read_record(text, line, layout, reporter)?);
    }
    Ok(records)
}

/// Parses one line into a record of `column_count` fields, applying the
/// recovery policy to the first failing position.
///
/// Malformed quoting in a field past the last column is still bad data:
/// it aborts, is reported, or triggers a fix like any other.
pub fn read_record(
    text: &str,
    line: usize,
    layout: LineLayout<'_>,
    reporter: &mut Reporter<'_>,
) -> Result<Record> {
    let parsed = parse_line(text, layout.delimiter);
    let mut record = Record::new(0).with_source_line(line);

    for field in 0..layout.column_count {
        let fault = if parsed.bad_field == Some(field) {
            Some(Fault::BadData)
        } else if field >= parsed.len() {
            Some(Fault::MissingField)
        } else {
            None
        };

        let Some(fault) = fault else {
            record.push_field(clean_field(&parsed.values[field]));
            continue;
        };

        match fault.recovery(&layout.policy) {
            Recovery::Abort => {
                return Err(fault.into_error(line, field, layout.column_count, text));
            }
            Recovery::Ignore => {
                let value = parsed
                    .values
                    .get(field)
                    .map(|value| clean_field(value))
                    .unwrap_or_default();
                match fault {
                    Fault::BadData => reporter.warning(format!(
                        "Ignoring bad data on line {line}, field {field}. Using \"{value}\""
                    )),
                    Fault::MissingField => reporter.warning(format!(
                        "Ignoring missing field on line {line}, field {field}. Using an empty value"
                    )),
                }
                record.push_field(value);
            }
            Recovery::Fix => {
                fix_record(
                    &mut record,
                    text,
                    line,
                    layout.delimiter,
                    layout.column_count,
                    reporter,
                );
                return Ok(record);
            }
        }
    }

    if let Some(field) = parsed.bad_field
        && field >= layout.column_count
    {
        match Fault::BadData.recovery(&layout.policy) {
            Recovery::Abort => {
                return Err(Fault::BadData.into_error(line, field, layout.column_count, text));
            }
            Recovery::Ignore => reporter.warning(format!(
                "Ignoring bad data on line {line}, field {field}. The field is past the last column ({})",
                layout.column_count
            )),
            Recovery::Fix => fix_record(
                &mut record,
                text,
                line,
                layout.delimiter,
                layout.column_count,
                reporter,
            ),
        }
    }

    tracing::debug!(line, fields = record.len(), "parsed line");
    Ok(record)
}
