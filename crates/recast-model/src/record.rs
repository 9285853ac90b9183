//! Records and fields of a loaded file.
//!
//! A [`RecordSet`] exclusively owns its [`Record`]s, and each record owns its
//! [`Field`]s. A field never points back at its record; the owning record is
//! identified by the `(row_number, column)` pair it is looked up with.
//! Column names are resolved once per load and shared by every record
//! through a reference-counted slice.

use std::sync::Arc;

/// A single cell: one column on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    text: String,
    column: usize,
}

impl Field {
    pub fn new(text: impl Into<String>, column: usize) -> Self {
        Self {
            text: text.into(),
            column,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of this field within the record it was created in.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// One row of fields, corresponding to one line of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row_number: usize,
    source_line: Option<usize>,
    fields: Vec<Field>,
    column_names: Arc<[String]>,
}

impl Record {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            source_line: None,
            fields: Vec::new(),
            column_names: Arc::from(Vec::new()),
        }
    }

    /// Attaches the 0-based physical line the record was read from.
    #[must_use]
    pub fn with_source_line(mut self, line: usize) -> Self {
        self.source_line = Some(line);
        self
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// Physical source line, absent for synthesized records.
    pub fn source_line(&self) -> Option<usize> {
        self.source_line
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends a field at the next column position and returns it.
    pub fn push_field(&mut self, text: impl Into<String>) -> &Field {
        let column = self.fields.len();
        self.fields.push(Field::new(text, column));
        &self.fields[column]
    }

    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }

    /// Safe lookup: negative or out-of-range indexes yield `None`.
    pub fn field(&self, index: i64) -> Option<&Field> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.fields.get(idx))
    }

    /// Field texts in column order.
    pub fn texts(&self) -> Vec<&str> {
        self.fields.iter().map(Field::text).collect()
    }

    /// Name of a column, or an empty string when no name is known.
    pub fn column_name(&self, column: usize) -> &str {
        self.column_names
            .get(column)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Name of the column a field belongs to.
    pub fn field_name(&self, field: &Field) -> &str {
        self.column_name(field.column())
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}

/// Ordered collection of records built during one load.
///
/// Row numbers are unique and increase from 0 in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
    column_names: Arc<[String]>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, assigning it the next row number.
    pub fn push(&mut self, mut record: Record) {
        record.row_number = self.records.len();
        self.records.push(record);
    }

    /// Inserts a record at row 0 and renumbers every following row.
    pub fn insert_first(&mut self, record: Record) {
        self.records.insert(0, record);
        for (row, record) in self.records.iter_mut().enumerate() {
            record.row_number = row;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Safe lookup: out-of-range rows yield `None`.
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn get_mut(&mut self, row: usize) -> Option<&mut Record> {
        self.records.get_mut(row)
    }

    /// Safe field lookup by row and (possibly negative) column index.
    pub fn field(&self, row: usize, column: i64) -> Option<&Field> {
        self.get(row).and_then(|record| record.field(column))
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Shares a resolved list of column names with every record.
    pub fn attach_column_names(&mut self, names: Vec<String>) {
        let names: Arc<[String]> = Arc::from(names);
        for record in &mut self.records {
            record.column_names = Arc::clone(&names);
        }
        self.column_names = names;
    }

    /// Drops every record and the resolved column names.
    pub fn clear(&mut self) {
        self.records.clear();
        self.column_names = Arc::from(Vec::new());
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> Record {
        let mut record = Record::new(0);
        for value in values {
            record.push_field(*value);
        }
        record
    }

    #[test]
    fn test_push_field_assigns_columns() {
        let record = record(&["a", "b", "c"]);
        let columns: Vec<usize> = record.fields().iter().map(Field::column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
        assert_eq!(record.texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_safe_field_lookup() {
        let record = record(&["a", "b"]);
        assert_eq!(record.field(1).map(Field::text), Some("b"));
        assert!(record.field(2).is_none());
        assert!(record.field(-1).is_none());
    }

    #[test]
    fn test_row_numbers_follow_insertion_order() {
        let mut set = RecordSet::new();
        set.push(record(&["x"]));
        set.push(record(&["y"]));
        let rows: Vec<usize> = set.iter().map(Record::row_number).collect();
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_insert_first_renumbers() {
        let mut set = RecordSet::new();
        set.push(record(&["1"]));
        set.push(record(&["2"]));
        set.insert_first(Record::new(0));
        let rows: Vec<usize> = set.iter().map(Record::row_number).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert!(set.get(0).unwrap().is_empty());
        assert_eq!(set.get(1).unwrap().texts(), vec!["1"]);
    }

    #[test]
    fn test_column_names_are_shared() {
        let mut set = RecordSet::new();
        set.push(record(&["Name", "Email"]));
        set.push(record(&["Ada", "ada@example.com"]));
        set.attach_column_names(vec!["Name".to_string(), "Email".to_string()]);

        let data = set.get(1).unwrap();
        let email = data.field(1).unwrap();
        assert_eq!(data.field_name(email), "Email");
        assert_eq!(data.column_name(5), "");
        assert_eq!(set.column_names(), ["Name", "Email"]);
    }

    #[test]
    fn test_out_of_range_row_is_none() {
        let set = RecordSet::new();
        assert!(set.get(0).is_none());
        assert!(set.field(3, 0).is_none());
    }
}
