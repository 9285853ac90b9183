//! Property tests for detection and round trips.

use proptest::prelude::*;
use recast_core::{
    DelimiterCounts, Processor, RecordingDiagnostics, Reporter, detect_delimiter, parse_line,
    quote_field,
};
use recast_model::{Delimiter, DelimiterSetting, ProcessOptions};

fn detect(lines: &[String]) -> Delimiter {
    let mut recorder = RecordingDiagnostics::new();
    let options = ProcessOptions::default();
    let mut reporter = Reporter::new(&mut recorder, &options);
    detect_delimiter(lines, &mut reporter)
}

fn cell() -> impl Strategy<Value = String> {
    // Printable values without delimiters, quotes or surrounding whitespace.
    "[A-Za-z0-9][A-Za-z0-9 .-]{0,6}[A-Za-z0-9]|[A-Za-z0-9]?"
}

proptest! {
    #[test]
    fn detection_is_deterministic(first in "[a-z,;\t]{0,20}", second in "[a-z,;\t]{0,20}") {
        let lines = vec![first, second];
        let delimiter = detect(&lines);
        prop_assert_eq!(&delimiter, &detect(&lines));
        prop_assert!(
            [Delimiter::comma(), Delimiter::semicolon(), Delimiter::tab()].contains(&delimiter)
        );
    }

    #[test]
    fn detection_follows_chain(comma in 0usize..5, semicolon in 0usize..5, tab in 0usize..5) {
        let line = format!("x{}{}{}", ",".repeat(comma), ";".repeat(semicolon), "\t".repeat(tab));
        let expected = if comma > semicolon {
            Delimiter::comma()
        } else if semicolon > tab {
            Delimiter::semicolon()
        } else if tab > 0 {
            Delimiter::tab()
        } else {
            Delimiter::comma()
        };
        prop_assert_eq!(DelimiterCounts::of_line(&line), DelimiterCounts { comma, semicolon, tab });
        prop_assert_eq!(detect(&[line]), expected);
    }

    #[test]
    fn quoted_values_parse_back(values in prop::collection::vec("[^\r\n]{0,8}", 1..6)) {
        let line = values
            .iter()
            .map(|value| quote_field(value))
            .collect::<Vec<_>>()
            .join(";");
        let parsed = parse_line(&line, &Delimiter::semicolon());
        prop_assert_eq!(parsed.bad_field, None);
        prop_assert_eq!(parsed.values, values);
    }

    #[test]
    fn well_formed_file_round_trips(rows in prop::collection::vec(prop::collection::vec(cell(), 3), 1..8)) {
        let source: Vec<String> = rows.iter().map(|row| row.join(",")).collect();
        let options = ProcessOptions::default()
            .with_delimiter_read(DelimiterSetting::Explicit(Delimiter::comma()))
            .with_column_count(3);
        let mut processor = Processor::new(options, RecordingDiagnostics::new());
        processor.load_lines(&source).unwrap();
        processor.set_pattern("0,1,2").unwrap();

        let expected: Vec<String> = rows
            .iter()
            .map(|row| row.iter().map(|value| quote_field(value)).collect::<Vec<_>>().join(","))
            .collect();
        prop_assert_eq!(processor.output_lines(), expected);
        prop_assert!(processor.diagnostics().warnings().is_empty());
    }
}
