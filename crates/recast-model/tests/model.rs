//! Integration tests for the record model and configuration types.

use proptest::prelude::*;

use recast_model::{
    Delimiter, DelimiterSetting, ExitCode, ProcessOptions, Record, RecordSet, SelectionPattern,
};

#[test]
fn options_round_trip_through_json() {
    let options = ProcessOptions::default()
        .with_delimiter_read(DelimiterSetting::Explicit(Delimiter::semicolon()))
        .with_delimiter_write(Delimiter::tab())
        .with_new_headers("A;B");
    let json = serde_json::to_string(&options).expect("serialize options");
    let restored: ProcessOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(restored, options);
}

#[test]
fn exit_code_serializes_by_name() {
    let json = serde_json::to_string(&ExitCode::InvalidFields).expect("serialize");
    assert_eq!(json, "\"InvalidFields\"");
}

#[test]
fn record_set_clear_discards_everything() {
    let mut set = RecordSet::new();
    let mut record = Record::new(0);
    record.push_field("a");
    set.push(record);
    set.attach_column_names(vec!["a".to_string()]);

    set.clear();

    assert!(set.is_empty());
    assert!(set.column_names().is_empty());
}

proptest! {
    #[test]
    fn pattern_parses_any_integer_list(entries in prop::collection::vec(-1i64..64, 1..12)) {
        let text = entries
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let pattern = SelectionPattern::parse(&text).unwrap();
        prop_assert_eq!(pattern.entries(), entries.as_slice());
    }

    #[test]
    fn resolved_empty_pattern_covers_every_column(count in 0usize..40) {
        let pattern = SelectionPattern::default().resolve(count);
        prop_assert_eq!(pattern.len(), count);
        for (position, entry) in pattern.entries().iter().enumerate() {
            prop_assert_eq!(*entry, position as i64);
        }
    }
}
