//! Reading a source file into decoded lines.

use std::path::Path;

use crate::encoding::TextEncoding;
use crate::error::{IngestError, Result};

/// Decoded content of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Physical lines without terminators.
    pub lines: Vec<String>,
    /// Malformed byte sequences were replaced while decoding.
    pub had_decode_errors: bool,
}

/// Reads and decodes a whole file.
///
/// A leading byte-order mark selects the encoding it announces and is
/// removed. Lines are split on `\r\n`, `\n` and a lone `\r`; a trailing
/// terminator does not produce an extra empty line.
pub fn read_source(path: &Path, encoding: &TextEncoding) -> Result<SourceText> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let (text, had_decode_errors) = encoding.decode(&bytes);
    let lines = split_lines(&text);

    tracing::debug!(
        path = %path.display(),
        encoding = encoding.name(),
        bytes = bytes.len(),
        lines = lines.len(),
        "decoded source file"
    );

    Ok(SourceText {
        lines,
        had_decode_errors,
    })
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(['\r', '\n']) else {
            lines.push(rest.to_string());
            break;
        };
        lines.push(rest[..end].to_string());
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_lines() {
        let file = create_temp_file(b"A,B\r\n1,2\n3,4\n");
        let source = read_source(file.path(), &TextEncoding::utf8()).unwrap();
        assert_eq!(source.lines, vec!["A,B", "1,2", "3,4"]);
        assert!(!source.had_decode_errors);
    }

    #[test]
    fn test_read_carriage_return_lines() {
        let file = create_temp_file(b"a,b\r1,2\r");
        let source = read_source(file.path(), &TextEncoding::utf8()).unwrap();
        assert_eq!(source.lines, vec!["a,b", "1,2"]);
    }

    #[test]
    fn test_split_mixed_terminators() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\r\rb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_keeps_blank_lines() {
        let file = create_temp_file(b"A\n\nB");
        let source = read_source(file.path(), &TextEncoding::utf8()).unwrap();
        assert_eq!(source.lines, vec!["A", "", "B"]);
    }

    #[test]
    fn test_read_with_bom() {
        let file = create_temp_file(b"\xEF\xBB\xBFA,B\n");
        let source = read_source(file.path(), &TextEncoding::utf8()).unwrap();
        assert_eq!(source.lines, vec!["A,B"]);
    }

    #[test]
    fn test_read_latin1() {
        let file = create_temp_file(b"navn;by\nP\xE5l;T\xF8nsberg\n");
        let encoding = TextEncoding::from_name("latin1").unwrap();
        let source = read_source(file.path(), &encoding).unwrap();
        assert_eq!(source.lines[1], "Pål;Tønsberg");
    }

    #[test]
    fn test_invalid_utf8_is_flagged() {
        let file = create_temp_file(b"a\xFFb\n");
        let source = read_source(file.path(), &TextEncoding::utf8()).unwrap();
        assert!(source.had_decode_errors);
        assert_eq!(source.lines, vec!["a\u{fffd}b"]);
    }

    #[test]
    fn test_missing_file() {
        let result = read_source(Path::new("/definitely/not/here.csv"), &TextEncoding::utf8());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
