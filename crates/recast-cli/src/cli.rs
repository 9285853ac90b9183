//! CLI argument definitions for recast.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use recast_model::{Delimiter, DelimiterSetting};

#[derive(Parser)]
#[command(
    name = "recast",
    version,
    about = "Repair and convert delimited text files",
    long_about = "Load a CSV-like file, detect its delimiter and column count, recover from\n\
                  malformed lines, and write a re-quoted copy with a new delimiter,\n\
                  encoding, header row or column selection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a source file, optionally preview it, and save a converted copy.
    Convert(ConvertArgs),

    /// List every exit code and its meaning.
    ExitCodes,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Source file to load.
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Target file to write. Nothing is written when omitted.
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Source file to load (alternative to SOURCE).
    #[arg(long = "load", value_name = "PATH", conflicts_with = "source")]
    pub load: Option<PathBuf>,

    /// Target file to write (alternative to TARGET).
    #[arg(long = "save", value_name = "PATH", conflicts_with = "target")]
    pub save: Option<PathBuf>,

    /// Encoding of the source: a name (utf-8, utf-8-bom, latin1, ascii, ...)
    /// or a Windows code page number.
    #[arg(long = "in-encoding", value_name = "ENCODING", default_value = "")]
    pub in_encoding: String,

    /// Encoding of the target, same forms as --in-encoding.
    #[arg(long = "out-encoding", value_name = "ENCODING", default_value = "")]
    pub out_encoding: String,

    /// Output columns as comma separated indexes; -1 inserts an empty column.
    ///
    /// Example: `--columns=0,-1,4`. All columns are written when omitted.
    #[arg(
        long = "columns",
        value_name = "PATTERN",
        default_value = "",
        allow_hyphen_values = true
    )]
    pub columns: String,

    /// Number of fields per line (0 detects it from the first lines).
    #[arg(long = "column-count", value_name = "N", default_value_t = 0)]
    pub column_count: usize,

    /// Print the first N converted lines.
    #[arg(
        long = "example",
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "5"
    )]
    pub example: Option<usize>,

    /// Delimiter of the source: auto, comma, semicolon, tab or literal text.
    #[arg(
        long = "in-delimiter",
        value_name = "DELIMITER",
        default_value = "auto",
        value_parser = parse_delimiter_setting
    )]
    pub in_delimiter: DelimiterSetting,

    /// Delimiter of the target: comma, semicolon, tab or literal text.
    #[arg(
        long = "out-delimiter",
        value_name = "DELIMITER",
        default_value = "comma",
        value_parser = parse_delimiter
    )]
    pub out_delimiter: Delimiter,

    /// Print the column names found in the first row.
    #[arg(long = "show-headers")]
    pub show_headers: bool,

    /// Do not print progress messages.
    #[arg(long = "silent")]
    pub silent: bool,

    /// Do not print warnings.
    #[arg(long = "suppress-warnings")]
    pub suppress_warnings: bool,

    /// Do not print error explanations.
    #[arg(long = "suppress-errors")]
    pub suppress_errors: bool,

    /// Wait for Enter before exiting.
    #[arg(long = "pause")]
    pub pause: bool,

    /// Write a byte order mark when the target encoding is UTF-8.
    #[arg(long = "bom")]
    pub bom: bool,

    /// Keep lines with malformed quoting instead of failing.
    #[arg(long = "ignore-bad-data")]
    pub ignore_bad_data: bool,

    /// Fill missing fields with empty values instead of failing.
    #[arg(long = "ignore-missing")]
    pub ignore_missing: bool,

    /// Re-split malformed lines without quote handling.
    ///
    /// Takes precedence over --ignore-bad-data and --ignore-missing.
    #[arg(long = "fix-bad-data")]
    pub fix_bad_data: bool,

    /// The source has no header row.
    #[arg(long = "no-headers")]
    pub no_headers: bool,

    /// Replace the header row. Without NAMES, generic `Column n` names are used.
    ///
    /// NAMES are separated by the source delimiter.
    #[arg(
        long = "new-headers",
        value_name = "NAMES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    pub new_headers: Option<String>,

    /// Warn when the source was modified more than DAYS ago.
    #[arg(
        long = "age-warning",
        value_name = "DAYS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_AGE_DAYS
    )]
    pub age_warning: Option<u64>,

    /// Fail when the source was modified more than DAYS ago.
    #[arg(
        long = "age-error",
        value_name = "DAYS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_AGE_DAYS
    )]
    pub age_error: Option<u64>,
}

/// Day limit used by the age flags when given without a value.
const DEFAULT_AGE_DAYS: &str = "5";

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter_setting(text: &str) -> Result<DelimiterSetting, String> {
    Ok(DelimiterSetting::from_name(text))
}

fn parse_delimiter(text: &str) -> Result<Delimiter, String> {
    Delimiter::from_name(text).ok_or_else(|| "delimiter must not be empty".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ConvertArgs {
        let cli = Cli::try_parse_from(std::iter::once("recast").chain(args.iter().copied()))
            .expect("parse");
        match cli.command {
            Command::Convert(args) => args,
            Command::ExitCodes => panic!("expected convert"),
        }
    }

    #[test]
    fn test_positional_files() {
        let args = parse(&["convert", "in.csv", "out.csv"]);
        assert_eq!(args.source, Some(PathBuf::from("in.csv")));
        assert_eq!(args.target, Some(PathBuf::from("out.csv")));
        assert_eq!(args.in_delimiter, DelimiterSetting::Auto);
        assert_eq!(args.out_delimiter, Delimiter::comma());
    }

    #[test]
    fn test_optional_values() {
        let args = parse(&["convert", "in.csv", "--example", "--age-error=10", "--new-headers"]);
        assert_eq!(args.example, Some(5));
        assert_eq!(args.age_error, Some(10));
        assert_eq!(args.age_warning, None);
        assert_eq!(args.new_headers, Some(String::new()));
    }

    #[test]
    fn test_columns_accept_negative_entries() {
        let args = parse(&["convert", "--columns", "-1,0", "--out-delimiter", "tab", "in.csv"]);
        assert_eq!(args.columns, "-1,0");
        assert_eq!(args.out_delimiter, Delimiter::tab());
    }

    #[test]
    fn test_default_age_matches_ingest() {
        assert_eq!(
            DEFAULT_AGE_DAYS.parse::<u64>().unwrap(),
            recast_ingest::DEFAULT_AGE_LIMIT_DAYS
        );
    }

    #[test]
    fn test_load_conflicts_with_source() {
        let result = Cli::try_parse_from(["recast", "convert", "a.csv", "--load", "b.csv"]);
        assert!(result.is_err());
    }
}
