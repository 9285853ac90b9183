//! Field selection and serialization of output lines.

use recast_model::{BLANK_COLUMN, Delimiter, Record, RecordSet, SelectionPattern};

use crate::diagnostics::Reporter;

/// Text shown by the preview when nothing was loaded.
pub const NO_LINES_TEXT: &str = "There are no lines to display";

/// Doubles embedded quotes and wraps the value in quotes.
pub fn quote_field(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Serializes the selected fields of one record.
///
/// `pattern` must already be resolved against the column count. Entries
/// that do not name a field produce an empty value; only entries other than
/// [`BLANK_COLUMN`] are reported.
pub fn project_record(
    record: &Record,
    pattern: &SelectionPattern,
    delimiter: &Delimiter,
    reporter: &mut Reporter<'_>,
) -> String {
    let values: Vec<String> = pattern
        .entries()
        .iter()
        .enumerate()
        .map(|(position, &column)| {
            let text = match record.field(column) {
                Some(field) => field.text(),
                None => {
                    if column != BLANK_COLUMN {
                        reporter.warning(format!(
                            "Error reading field {position} on row {}. Column {column} is out of range",
                            record.row_number()
                        ));
                    }
                    ""
                }
            };
            quote_field(text)
        })
        .collect();
    values.join(delimiter.as_str())
}

/// Serializes up to `limit` records (all when `None`).
pub fn project_records(
    records: &RecordSet,
    pattern: &SelectionPattern,
    delimiter: &Delimiter,
    limit: Option<usize>,
    reporter: &mut Reporter<'_>,
) -> Vec<String> {
    let limit = limit.unwrap_or(records.len());
    records
        .iter()
        .take(limit)
        .map(|record| project_record(record, pattern, delimiter, reporter))
        .collect()
}

/// Preview text: one projected line per row, prefixed by its row index.
pub fn render_preview(lines: &[String]) -> String {
    if lines.is_empty() {
        return NO_LINES_TEXT.to_string();
    }
    lines
        .iter()
        .enumerate()
        .map(|(row, line)| format!("{row:<3}:  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use recast_model::ProcessOptions;

    fn record(values: &[&str]) -> Record {
        let mut record = Record::new(0);
        for value in values {
            record.push_field(*value);
        }
        record
    }

    fn project(values: &[&str], pattern: &[i64], delimiter: &str) -> (String, RecordingDiagnostics) {
        let mut recorder = RecordingDiagnostics::new();
        let options = ProcessOptions::default();
        let line = {
            let mut reporter = Reporter::new(&mut recorder, &options);
            project_record(
                &record(values),
                &SelectionPattern::new(pattern.to_vec()),
                &Delimiter::from_name(delimiter).unwrap(),
                &mut reporter,
            )
        };
        (line, recorder)
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "\"plain\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field(""), "\"\"");
    }

    #[test]
    fn test_blank_column_is_silent() {
        let (line, recorder) = project(&["a", "b", "c"], &[0, -1, 2], ";");
        assert_eq!(line, "\"a\";\"\";\"c\"");
        assert!(recorder.warnings().is_empty());
    }

    #[test]
    fn test_out_of_range_warns_once_per_entry() {
        let (line, recorder) = project(&["a"], &[5, 0, 5, -2], ",");
        assert_eq!(line, "\"\",\"a\",\"\",\"\"");
        assert_eq!(recorder.warnings().len(), 3);
    }

    #[test]
    fn test_reorder_and_duplicate() {
        let (line, _) = project(&["a", "b"], &[1, 0, 1], "tab");
        assert_eq!(line, "\"b\"\t\"a\"\t\"b\"");
    }

    #[test]
    fn test_render_preview() {
        let lines = vec!["\"a\",\"b\"".to_string(), "\"1\",\"2\"".to_string()];
        insta::assert_snapshot!(render_preview(&lines), @r#"
        0  :  "a","b"
        1  :  "1","2"
        "#);
        assert_eq!(render_preview(&[]), NO_LINES_TEXT);
    }
}
