//! Console tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use recast_model::{ExitCode, Field};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Index and name of every field in the header row.
pub fn header_table(fields: &[Field]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Index"), header_cell("Column name")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for field in fields {
        let name = if field.text().is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(field.text())
        };
        table.add_row(vec![Cell::new(field.column()), name]);
    }
    table
}

/// Every exit code with its numeric value.
pub fn exit_code_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Meaning"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for code in ExitCode::ALL {
        let name = if code.is_failure() {
            Cell::new(code.name()).fg(Color::Red)
        } else {
            Cell::new(code.name()).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(code.code()), name, Cell::new(meaning(code))]);
    }
    table
}

fn meaning(code: ExitCode) -> &'static str {
    match code {
        ExitCode::Success => "Operation completed",
        ExitCode::InfoShown => "Help or information was shown",
        ExitCode::SourceFileNotFound => "Source file missing or not specified",
        ExitCode::SourceFileParseError => "Source line has bad data or missing fields",
        ExitCode::TargetFileError => "Target file could not be written",
        ExitCode::InvalidEncoding => "Encoding name or code page not recognized",
        ExitCode::InvalidFields => "Column selection could not be parsed",
        ExitCode::InvalidArgument => "Command line argument not recognized",
        ExitCode::TargetUnauthorized => "No permission to write to the target folder",
        ExitCode::TargetDirectoryNotFound => "Target folder does not exist",
        ExitCode::UnknownError => "Unexpected failure",
        ExitCode::SourceFileOutdated => "Source file is older than the age limit",
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
