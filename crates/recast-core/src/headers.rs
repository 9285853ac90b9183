//! Header row rewriting and column name resolution.

use recast_model::{Delimiter, ProcessOptions, Record, RecordSet};

use crate::diagnostics::Reporter;

/// Generic name for a column, numbered from 0 like the column index.
pub fn generic_column_name(column: usize) -> String {
    format!("Column {column}")
}

/// Runs once per load after every line is parsed.
///
/// Optionally rewrites row 0 (inserting it first for headerless sources),
/// then attaches the names found in row 0 to every record.
pub fn resolve_headers(
    records: &mut RecordSet,
    options: &ProcessOptions,
    column_count: usize,
    read_delimiter: &Delimiter,
    reporter: &mut Reporter<'_>,
) {
    if options.replace_headers {
        replace_headers(records, options, column_count, read_delimiter, reporter);
    }

    let names: Vec<String> = records
        .get(0)
        .map(|header| header.texts().into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    tracing::debug!(?names, "resolved column names");
    records.attach_column_names(names);
}

fn replace_headers(
    records: &mut RecordSet,
    options: &ProcessOptions,
    column_count: usize,
    read_delimiter: &Delimiter,
    reporter: &mut Reporter<'_>,
) {
    if records.is_empty() {
        reporter.warning("Could not change column names, there are no records");
        return;
    }

    if !options.file_has_headers {
        records.insert_first(Record::new(0));
    }

    let names = if options.new_headers.is_empty() {
        reporter.message("Changing column names to generic names");
        (0..column_count).map(generic_column_name).collect()
    } else {
        reporter.message(format!("Changing column names to: {}", options.new_headers));
        supplied_names(&options.new_headers, column_count, read_delimiter, reporter)
    };

    if let Some(header) = records.get_mut(0) {
        header.clear_fields();
        for name in names {
            header.push_field(name);
        }
    }
}

/// Splits replacement header text and fits it to the column count.
pub fn supplied_names(
    text: &str,
    column_count: usize,
    read_delimiter: &Delimiter,
    reporter: &mut Reporter<'_>,
) -> Vec<String> {
    let mut names: Vec<String> = text
        .split(read_delimiter.as_str())
        .map(|name| name.replace('"', ""))
        .collect();

    if names.len() > column_count {
        let dropped = names.split_off(column_count);
        reporter.warning(format!(
            "Too many column names, expected {column_count}. Dropping: {}",
            dropped.join(read_delimiter.as_str())
        ));
    } else if names.len() < column_count {
        reporter.warning(format!(
            "Too few column names, expected {column_count}, got {}. Adding generic names",
            names.len()
        ));
        names.extend((names.len()..column_count).map(generic_column_name));
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    fn record_set(rows: &[&[&str]]) -> RecordSet {
        let mut records = RecordSet::new();
        for (line, row) in rows.iter().enumerate() {
            let mut record = Record::new(0).with_source_line(line);
            for value in *row {
                record.push_field(*value);
            }
            records.push(record);
        }
        records
    }

    fn resolve(
        records: &mut RecordSet,
        options: &ProcessOptions,
        column_count: usize,
    ) -> RecordingDiagnostics {
        let mut recorder = RecordingDiagnostics::new();
        {
            let mut reporter = Reporter::new(&mut recorder, options);
            resolve_headers(records, options, column_count, &Delimiter::comma(), &mut reporter);
        }
        recorder
    }

    #[test]
    fn test_original_headers_attached() {
        let mut records = record_set(&[&["Name", "Email"], &["Ann", "a@x"]]);
        let recorder = resolve(&mut records, &ProcessOptions::default(), 2);
        assert_eq!(records.column_names(), ["Name", "Email"]);
        assert_eq!(records.get(1).unwrap().column_name(1), "Email");
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_replacement_drops_extra_names() {
        let mut records = record_set(&[&["Name", "Email"], &["Ann", "a@x"]]);
        let options = ProcessOptions::default().with_new_headers("X,Y,Z");
        let recorder = resolve(&mut records, &options, 2);
        assert_eq!(records.column_names(), ["X", "Y"]);
        assert_eq!(records.len(), 2);
        let warnings = recorder.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].ends_with("Dropping: Z"));
    }

    #[test]
    fn test_replacement_pads_with_generic_names() {
        let mut records = record_set(&[&["a", "b", "c"]]);
        let options = ProcessOptions::default().with_new_headers("\"Id\"");
        let recorder = resolve(&mut records, &options, 3);
        assert_eq!(records.column_names(), ["Id", "Column 1", "Column 2"]);
        assert_eq!(recorder.warnings().len(), 1);
    }

    #[test]
    fn test_headerless_source_gets_synthetic_row() {
        let mut records = record_set(&[&["1", "2"], &["3", "4"]]);
        let options = ProcessOptions::default()
            .with_headers(false)
            .with_new_headers("");
        resolve(&mut records, &options, 2);
        assert_eq!(records.len(), 3);
        assert_eq!(records.get(0).unwrap().texts(), vec!["Column 0", "Column 1"]);
        assert_eq!(records.get(0).unwrap().source_line(), None);
        assert_eq!(records.get(1).unwrap().row_number(), 1);
        assert_eq!(records.get(2).unwrap().texts(), vec!["3", "4"]);
    }

    #[test]
    fn test_replace_on_empty_set_warns() {
        let mut records = RecordSet::new();
        let options = ProcessOptions::default().with_new_headers("a,b");
        let recorder = resolve(&mut records, &options, 2);
        assert!(records.is_empty());
        assert_eq!(
            recorder.warnings(),
            vec!["Could not change column names, there are no records"]
        );
    }
}
