//! Load, inspect and save a delimited file.
//!
//! [`Processor`] owns the record set of the current source and the
//! diagnostics host. It runs the stages in order: delimiter detection,
//! column count resolution, line parsing with recovery, header resolution.
//! The result is then projected for previews and saving.
//!
//! Fatal conditions call [`Diagnostics::exit`] before the error is
//! returned, so a terminating host never sees the `Err`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use recast_ingest::{TextEncoding, file_age, read_source, write_lines};
use recast_model::{
    Delimiter, DelimiterSetting, ExitCode, Field, ProcessOptions, Record, RecordSet, RecoveryPolicy,
    SelectionPattern,
};

use crate::detect::{detect_delimiter, resolve_column_count};
use crate::diagnostics::{Diagnostics, ExitRequest, Reporter};
use crate::error::{ProcessError, Result};
use crate::headers::resolve_headers;
use crate::projector::{project_records, render_preview};
use crate::store::{LineLayout, read_records};

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records parsed from the source, before any synthetic header row.
    pub rows: usize,
    pub column_count: usize,
    pub delimiter: Delimiter,
    pub elapsed: Duration,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub lines_written: usize,
    pub bytes_written: usize,
    pub encoding: &'static str,
}

/// Record engine bound to one diagnostics host.
pub struct Processor<D: Diagnostics> {
    options: ProcessOptions,
    policy: RecoveryPolicy,
    diagnostics: D,
    records: RecordSet,
    delimiter: Delimiter,
    column_count: usize,
    pattern: SelectionPattern,
}

impl<D: Diagnostics> Processor<D> {
    /// Creates a processor, reconciling conflicting recovery flags first.
    pub fn new(mut options: ProcessOptions, mut diagnostics: D) -> Self {
        let resolution = options.resolve_policy();
        {
            let mut reporter = Reporter::new(&mut diagnostics, &options);
            for warning in &resolution.warnings {
                reporter.warning(warning);
            }
        }
        let delimiter = match &options.delimiter_read {
            DelimiterSetting::Explicit(delimiter) => delimiter.clone(),
            DelimiterSetting::Auto => Delimiter::default(),
        };
        let column_count = options.column_count;

        Self {
            options,
            policy: resolution.policy,
            diagnostics,
            records: RecordSet::new(),
            delimiter,
            column_count,
            pattern: SelectionPattern::default(),
        }
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    pub fn policy(&self) -> RecoveryPolicy {
        self.policy
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Read delimiter resolved by the last load.
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Column count resolved by the last load.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Active selection pattern, resolved against the column count.
    pub fn pattern(&self) -> SelectionPattern {
        self.pattern.resolve(self.column_count)
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    // === Loading ===

    /// Reads, decodes and parses a source file.
    pub fn load(&mut self, path: &Path, encoding_name: &str) -> Result<LoadSummary> {
        let encoding = match self.resolve_encoding(encoding_name) {
            Ok(encoding) => encoding,
            Err(source) => return Err(self.fail(ProcessError::Source(source))),
        };
        self.reporter().message(format!(
            "Loading CSV ({}) with encoding {}",
            path.display(),
            encoding.name()
        ));

        let source = match read_source(path, &encoding) {
            Ok(source) => source,
            Err(source) => return Err(self.fail(ProcessError::Source(source))),
        };
        if source.had_decode_errors {
            self.reporter().warning(format!(
                "Some bytes in {} are not valid {} and were replaced",
                path.display(),
                encoding.name()
            ));
        }

        let summary = self.load_lines(&source.lines)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.reporter().message(format!(
            "Loaded {} lines from: {file_name} in {:.3} seconds",
            summary.rows,
            summary.elapsed.as_secs_f64()
        ));
        tracing::info!(
            path = %path.display(),
            rows = summary.rows,
            columns = summary.column_count,
            delimiter = summary.delimiter.describe(),
            duration_ms = summary.elapsed.as_millis() as u64,
            "loaded source"
        );

        Ok(summary)
    }

    /// Parses already decoded lines, replacing any previously loaded records.
    pub fn load_lines(&mut self, lines: &[String]) -> Result<LoadSummary> {
        let started = Instant::now();
        self.records.clear();

        let mut reporter = Reporter::new(&mut self.diagnostics, &self.options);
        let delimiter = match &self.options.delimiter_read {
            DelimiterSetting::Explicit(delimiter) => delimiter.clone(),
            DelimiterSetting::Auto => detect_delimiter(lines, &mut reporter),
        };
        let column_count =
            resolve_column_count(lines, &delimiter, self.options.column_count, &mut reporter);

        let layout = LineLayout {
            delimiter: &delimiter,
            column_count,
            policy: self.policy,
        };
        let parsed = read_records(lines, layout, &mut reporter);
        self.delimiter = delimiter;
        self.column_count = column_count;

        let mut records = match parsed {
            Ok(records) => records,
            Err(error) => return Err(self.fail(error)),
        };
        let rows = records.len();

        let mut reporter = Reporter::new(&mut self.diagnostics, &self.options);
        resolve_headers(
            &mut records,
            &self.options,
            column_count,
            &self.delimiter,
            &mut reporter,
        );
        self.records = records;

        Ok(LoadSummary {
            rows,
            column_count,
            delimiter: self.delimiter.clone(),
            elapsed: started.elapsed(),
        })
    }

    /// Fails or warns when the file was modified more than `limit_days` ago.
    pub fn check_file_age(&mut self, path: &Path, limit_days: u64, fail: bool) -> Result<()> {
        let age = match file_age(path) {
            Ok(age) => age,
            Err(source) => return Err(self.fail(ProcessError::Source(source))),
        };
        if !age.is_older_than_days(limit_days) {
            return Ok(());
        }

        let error = ProcessError::SourceOutdated {
            path: path.to_path_buf(),
            days: age.days(),
            limit: limit_days,
        };
        if fail {
            return Err(self.fail(error));
        }
        self.reporter().warning(format!(
            "{error} (last modified {})",
            age.modified_display()
        ));
        Ok(())
    }

    // === Selection ===

    /// Sets the output field selection from comma separated column indexes.
    pub fn set_pattern(&mut self, text: &str) -> Result<()> {
        match SelectionPattern::parse(text) {
            Ok(pattern) => {
                tracing::debug!(pattern = ?pattern.entries(), "selection pattern set");
                self.pattern = pattern;
                Ok(())
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    /// Fields of one row, `None` when the row does not exist.
    pub fn record_as_array(&self, row: usize) -> Option<&[Field]> {
        self.records.get(row).map(Record::fields)
    }

    // === Output ===

    /// Projected lines of every record.
    pub fn output_lines(&mut self) -> Vec<String> {
        self.projected(None)
    }

    /// Preview of the first `limit` projected records with row prefixes.
    pub fn records_as_text(&mut self, limit: Option<usize>) -> String {
        render_preview(&self.projected(limit))
    }

    fn projected(&mut self, limit: Option<usize>) -> Vec<String> {
        let pattern = self.pattern();
        let mut reporter = Reporter::new(&mut self.diagnostics, &self.options);
        project_records(
            &self.records,
            &pattern,
            &self.options.delimiter_write,
            limit,
            &mut reporter,
        )
    }

    /// Projects every record and writes the lines to `path`.
    pub fn save(&mut self, path: &Path, encoding_name: &str) -> Result<SaveSummary> {
        let encoding = match self.resolve_encoding(encoding_name) {
            Ok(encoding) => encoding.with_byte_order_mark(self.options.byte_order_mark),
            Err(source) => return Err(self.fail(ProcessError::TargetEncoding(source))),
        };
        self.reporter().message(format!(
            "Saving to file: {}, Encoding: {}",
            path.display(),
            encoding.name()
        ));

        let lines = self.output_lines();
        match write_lines(path, &lines, &encoding) {
            Ok(written) => {
                if written.had_unmappable {
                    self.reporter().warning(format!(
                        "Some characters can't be represented in {} and were replaced",
                        encoding.name()
                    ));
                }
                tracing::info!(
                    path = %path.display(),
                    lines = written.lines_written,
                    bytes = written.bytes_written,
                    encoding = encoding.name(),
                    "saved target"
                );
                Ok(SaveSummary {
                    path: path.to_path_buf(),
                    lines_written: written.lines_written,
                    bytes_written: written.bytes_written,
                    encoding: encoding.name(),
                })
            }
            Err(source) => {
                self.reporter().error(source.to_string());
                Err(self.fail(ProcessError::Save {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        }
    }

    // === Exit ===

    /// Reports a final state to the host.
    pub fn exit(&mut self, code: ExitCode, message: Option<String>) {
        let quiet = if code.is_failure() {
            self.options.suppress_errors
        } else {
            self.options.quiet
        };
        let request = ExitRequest {
            code,
            message,
            quiet,
            pause: self.options.pause,
            terminate: !code.is_failure() || self.options.exit_on_error,
        };
        self.diagnostics.exit(&request);
    }

    fn fail(&mut self, error: ProcessError) -> ProcessError {
        tracing::debug!(code = error.exit_code().code(), %error, "fatal processing error");
        self.exit(error.exit_code(), Some(error.to_string()));
        error
    }

    fn resolve_encoding(&mut self, name: &str) -> recast_ingest::Result<TextEncoding> {
        let encoding = TextEncoding::from_name(name)?;
        if let Some(code_page) = encoding.fallback_code_page() {
            self.reporter().warning(format!(
                "Code page {code_page} is not supported, using {}",
                encoding.name()
            ));
        }
        Ok(encoding)
    }

    fn reporter(&mut self) -> Reporter<'_> {
        Reporter::new(&mut self.diagnostics, &self.options)
    }
}
