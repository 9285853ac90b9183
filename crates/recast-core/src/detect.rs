//! Delimiter detection and column count resolution.
//!
//! Both run once per load, before any line is parsed, and only look at the
//! first two lines of the source.

use recast_model::Delimiter;

use crate::diagnostics::Reporter;

/// Occurrences of each candidate delimiter on one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterCounts {
    pub comma: usize,
    pub semicolon: usize,
    pub tab: usize,
}

impl DelimiterCounts {
    /// Counts each candidate as the number of split segments minus one.
    pub fn of_line(line: &str) -> Self {
        Self {
            comma: separators(line, ","),
            semicolon: separators(line, ";"),
            tab: separators(line, "\t"),
        }
    }

    /// No candidate appears on the line.
    pub fn is_empty(&self) -> bool {
        self.comma == 0 && self.semicolon == 0 && self.tab == 0
    }

    /// Applies the pairwise preference chain.
    ///
    /// This is not a majority vote: comma is compared only against semicolon,
    /// and semicolon only against tab. `comma=3, semicolon=0, tab=10` selects
    /// comma. Returns `None` when nothing wins.
    pub fn choose(&self) -> Option<Delimiter> {
        if self.comma > self.semicolon {
            Some(Delimiter::comma())
        } else if self.semicolon > self.tab {
            Some(Delimiter::semicolon())
        } else if self.tab > 0 {
            Some(Delimiter::tab())
        } else {
            None
        }
    }
}

fn separators(line: &str, delimiter: &str) -> usize {
    line.split(delimiter).count() - 1
}

/// Guesses the field separator from the first lines of a file.
///
/// Line 1 is only consulted when line 0 contains none of the candidates.
/// Falls back to comma with a warning.
pub fn detect_delimiter(lines: &[String], reporter: &mut Reporter<'_>) -> Delimiter {
    let Some(first) = lines.first() else {
        reporter.warning("Couldn't count delimiters, the file has no lines. Defaulting to comma");
        return Delimiter::comma();
    };

    let mut counts = DelimiterCounts::of_line(first);
    if counts.is_empty()
        && let Some(second) = lines.get(1)
    {
        tracing::debug!("no delimiter on line 0, sampling line 1");
        counts = DelimiterCounts::of_line(second);
    }

    tracing::debug!(
        comma = counts.comma,
        semicolon = counts.semicolon,
        tab = counts.tab,
        "delimiter counts"
    );

    match counts.choose() {
        Some(delimiter) => {
            reporter.message(format!("Delimiter detected: {}", delimiter.describe()));
            delimiter
        }
        None => {
            reporter.warning("Couldn't detect a delimiter (comma, semicolon or tab). Defaulting to comma");
            Delimiter::comma()
        }
    }
}

/// Resolves the number of fields every record is expected to have.
///
/// An explicit (non-zero) count is returned unchanged. Otherwise line 0 is
/// split by the delimiter; when it yields a single field the larger of
/// line 0 and line 1 is used, preferring line 0 on ties.
pub fn resolve_column_count(
    lines: &[String],
    delimiter: &Delimiter,
    explicit: usize,
    reporter: &mut Reporter<'_>,
) -> usize {
    if explicit != 0 {
        return explicit;
    }

    let count_of = |row: usize| {
        lines
            .get(row)
            .map(|line| line.split(delimiter.as_str()).count())
            .unwrap_or(0)
    };

    let first = count_of(0);
    if first > 1 {
        return first;
    }

    let second = count_of(1);
    let resolved = first.max(second);
    if !lines.is_empty() {
        reporter.warning(format!(
            "Line 0 has {first} field(s) using delimiter {}, line 1 has {second}. Using {resolved} columns",
            delimiter.describe()
        ));
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use recast_model::ProcessOptions;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    fn detect(values: &[&str]) -> (Delimiter, RecordingDiagnostics) {
        let mut recorder = RecordingDiagnostics::new();
        let options = ProcessOptions::default();
        let delimiter = {
            let mut reporter = Reporter::new(&mut recorder, &options);
            detect_delimiter(&lines(values), &mut reporter)
        };
        (delimiter, recorder)
    }

    #[test]
    fn test_detect_common_delimiters() {
        assert_eq!(detect(&["a,b,c"]).0, Delimiter::comma());
        assert_eq!(detect(&["a;b;c"]).0, Delimiter::semicolon());
        assert_eq!(detect(&["a\tb\tc"]).0, Delimiter::tab());
    }

    #[test]
    fn test_detect_chain_is_not_argmax() {
        // Comma beats semicolon and is never compared with tab.
        assert_eq!(detect(&["a,b,c,d\tx\tx\tx\tx\tx\tx\tx\tx\tx\tx"]).0, Delimiter::comma());
        // Semicolon loses to tab only when tab is at least as frequent.
        assert_eq!(detect(&["a;b\tc"]).0, Delimiter::tab());
        assert_eq!(detect(&["a;b;c\td"]).0, Delimiter::semicolon());
    }

    #[test]
    fn test_detect_uses_second_line() {
        let (delimiter, _) = detect(&["title", "a;b"]);
        assert_eq!(delimiter, Delimiter::semicolon());
    }

    #[test]
    fn test_detect_defaults_to_comma_with_warning() {
        let (delimiter, recorder) = detect(&["title", "value"]);
        assert_eq!(delimiter, Delimiter::comma());
        assert_eq!(recorder.warnings().len(), 1);

        let (delimiter, recorder) = detect(&[]);
        assert_eq!(delimiter, Delimiter::comma());
        assert_eq!(recorder.warnings().len(), 1);
    }

    fn columns(values: &[&str], explicit: usize) -> (usize, RecordingDiagnostics) {
        let mut recorder = RecordingDiagnostics::new();
        let options = ProcessOptions::default();
        let count = {
            let mut reporter = Reporter::new(&mut recorder, &options);
            resolve_column_count(&lines(values), &Delimiter::comma(), explicit, &mut reporter)
        };
        (count, recorder)
    }

    #[test]
    fn test_column_count_from_first_line() {
        let (count, recorder) = columns(&["a,b,c", "1,2"], 0);
        assert_eq!(count, 3);
        assert!(recorder.warnings().is_empty());
    }

    #[test]
    fn test_column_count_explicit() {
        assert_eq!(columns(&["a,b,c"], 7).0, 7);
    }

    #[test]
    fn test_column_count_falls_back_to_second_line() {
        let (count, recorder) = columns(&["title", "1,2,3,4"], 0);
        assert_eq!(count, 4);
        assert_eq!(recorder.warnings().len(), 1);
    }

    #[test]
    fn test_column_count_empty_file() {
        let (count, recorder) = columns(&[], 0);
        assert_eq!(count, 0);
        assert!(recorder.warnings().is_empty());
    }
}
