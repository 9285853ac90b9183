use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use recast_core::{ProcessError, Processor};
use recast_model::{ExitCode, ProcessOptions};
use tracing::{debug, info_span};

use crate::cli::ConvertArgs;
use crate::console::ConsoleDiagnostics;
use crate::tables::{exit_code_table, header_table};

const SUCCESS_MESSAGE: &str = "Operation completed successfully.";
const NO_SOURCE_MESSAGE: &str = "No valid source file specified.";

pub fn run_exit_codes(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", exit_code_table()).context("write exit code table")?;
    Ok(())
}

/// Engine options for a convert invocation.
pub fn process_options(args: &ConvertArgs) -> ProcessOptions {
    let mut options = ProcessOptions::default()
        .with_delimiter_read(args.in_delimiter.clone())
        .with_delimiter_write(args.out_delimiter.clone())
        .with_column_count(args.column_count)
        .with_headers(!args.no_headers)
        .with_ignore_bad_data(args.ignore_bad_data)
        .with_ignore_missing_field(args.ignore_missing)
        .with_fix_bad_data(args.fix_bad_data)
        .with_quiet(args.silent);
    if let Some(names) = &args.new_headers {
        options = options.with_new_headers(names.clone());
    }
    options.suppress_warnings = args.suppress_warnings;
    options.suppress_errors = args.suppress_errors;
    options.pause = args.pause;
    options.byte_order_mark = args.bom;
    if let Some(lines) = args.example {
        options.example_lines = lines;
    }
    options
}

/// Runs load, preview, header listing and save, then reports the final
/// state to the console host.
pub fn run_convert<W: Write>(args: &ConvertArgs, console: &mut ConsoleDiagnostics<W>) -> ExitCode {
    let options = process_options(args);
    match serde_json::to_string(&options) {
        Ok(json) => debug!(options = %json, "effective options"),
        Err(error) => debug!(%error, "could not serialize options"),
    }

    let mut processor = Processor::new(options, &mut *console);
    match convert(args, &mut processor) {
        Ok(code) => code,
        Err(error) => error.exit_code(),
    }
}

fn convert<W: Write>(
    args: &ConvertArgs,
    processor: &mut Processor<&mut ConsoleDiagnostics<W>>,
) -> std::result::Result<ExitCode, ProcessError> {
    let Some(source) = source_path(args) else {
        processor.exit(
            ExitCode::SourceFileNotFound,
            Some(NO_SOURCE_MESSAGE.to_string()),
        );
        return Ok(ExitCode::SourceFileNotFound);
    };

    let span = info_span!("convert", source = %source.display());
    let _guard = span.enter();

    if let Some(days) = args.age_error {
        processor.check_file_age(&source, days, true)?;
    }
    if let Some(days) = args.age_warning {
        processor.check_file_age(&source, days, false)?;
    }

    processor.load(&source, &args.in_encoding)?;
    processor.set_pattern(&args.columns)?;

    if args.example.is_some() {
        let limit = processor.options().example_lines;
        let preview = processor.records_as_text(Some(limit));
        processor.diagnostics_mut().print(&preview);
    }

    if args.show_headers {
        let table = match processor.record_as_array(0) {
            Some(fields) => header_table(fields).to_string(),
            None => "There are no column names to display".to_string(),
        };
        processor.diagnostics_mut().print(&table);
    }

    if let Some(target) = target_path(args) {
        processor.save(&target, &args.out_encoding)?;
    }

    processor.exit(ExitCode::Success, Some(SUCCESS_MESSAGE.to_string()));
    Ok(ExitCode::Success)
}

fn source_path(args: &ConvertArgs) -> Option<PathBuf> {
    args.source.clone().or_else(|| args.load.clone())
}

fn target_path(args: &ConvertArgs) -> Option<PathBuf> {
    args.target.clone().or_else(|| args.save.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_model::{Delimiter, DelimiterSetting};

    #[test]
    fn test_process_options_mapping() {
        let args = ConvertArgs {
            in_delimiter: DelimiterSetting::Explicit(Delimiter::semicolon()),
            out_delimiter: Delimiter::tab(),
            no_headers: true,
            new_headers: Some("a;b".to_string()),
            silent: true,
            bom: true,
            example: Some(3),
            ..ConvertArgs::default()
        };
        let options = process_options(&args);
        assert_eq!(
            options.delimiter_read,
            DelimiterSetting::Explicit(Delimiter::semicolon())
        );
        assert_eq!(options.delimiter_write, Delimiter::tab());
        assert!(!options.file_has_headers);
        assert!(options.replace_headers);
        assert_eq!(options.new_headers, "a;b");
        assert!(options.quiet);
        assert!(options.byte_order_mark);
        assert_eq!(options.example_lines, 3);
    }

    #[test]
    fn test_missing_source() {
        let mut console = ConsoleDiagnostics::new(Vec::new());
        let code = run_convert(&ConvertArgs::default(), &mut console);
        assert_eq!(code, ExitCode::SourceFileNotFound);
        let output = String::from_utf8(console.into_inner()).unwrap();
        assert!(output.contains(NO_SOURCE_MESSAGE));
    }
}
