//! Quote-aware line splitting.

use recast_model::Delimiter;

const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Values extracted from one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Raw values in column order, quotes removed and escapes resolved.
    /// Malformed fields still carry a best-effort value.
    pub values: Vec<String>,
    /// First field whose quoting was malformed.
    pub bad_field: Option<usize>,
}

impl ParsedLine {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits a line into values.
///
/// A field may be wrapped in double quotes, in which case delimiters inside
/// it are literal and `""` stands for one quote. A field is malformed when a
/// quote is never closed, when text follows a closing quote, or when an
/// unquoted field contains a quote.
pub fn parse_line(line: &str, delimiter: &Delimiter) -> ParsedLine {
    let delimiter = delimiter.as_str();
    if delimiter.is_empty() {
        return ParsedLine {
            values: vec![line.to_string()],
            bad_field: None,
        };
    }

    let mut values = Vec::new();
    let mut bad_field = None;
    let mut rest = line;
    loop {
        let segment = match rest.strip_prefix(QUOTE) {
            Some(quoted) => quoted_field(quoted, delimiter),
            None => plain_field(rest, delimiter),
        };
        if segment.malformed && bad_field.is_none() {
            bad_field = Some(values.len());
        }
        values.push(segment.value);
        match segment.rest {
            Some(next) => rest = next,
            None => break,
        }
    }

    ParsedLine { values, bad_field }
}

/// Normalizes a field value: strips byte-order marks and surrounding whitespace.
pub fn clean_field(text: &str) -> String {
    if text.contains(BYTE_ORDER_MARK) {
        text.replace(BYTE_ORDER_MARK, "").trim().to_string()
    } else {
        text.trim().to_string()
    }
}

struct Segment<'a> {
    value: String,
    /// Remaining input after the delimiter, `None` at end of line.
    rest: Option<&'a str>,
    malformed: bool,
}

fn plain_field<'a>(input: &'a str, delimiter: &str) -> Segment<'a> {
    let (value, rest) = match input.find(delimiter) {
        Some(end) => (&input[..end], Some(&input[end + delimiter.len()..])),
        None => (input, None),
    };
    Segment {
        value: value.to_string(),
        rest,
        malformed: value.contains(QUOTE),
    }
}

fn quoted_field<'a>(input: &'a str, delimiter: &str) -> Segment<'a> {
    let mut value = String::new();
    let mut chars = input.char_indices().peekable();
    while let Some((position, ch)) = chars.next() {
        if ch != QUOTE {
            value.push(ch);
            continue;
        }
        if chars.next_if(|&(_, next)| next == QUOTE).is_some() {
            value.push(QUOTE);
            continue;
        }

        let after = &input[position + QUOTE.len_utf8()..];
        if after.is_empty() {
            return Segment {
                value,
                rest: None,
                malformed: false,
            };
        }
        if let Some(rest) = after.strip_prefix(delimiter) {
            return Segment {
                value,
                rest: Some(rest),
                malformed: false,
            };
        }

        // Text after the closing quote is kept, up to the next delimiter.
        let tail = plain_field(after, delimiter);
        value.push_str(&tail.value);
        return Segment {
            value,
            rest: tail.rest,
            malformed: true,
        };
    }

    // Unterminated quote swallows the rest of the line.
    Segment {
        value,
        rest: None,
        malformed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedLine {
        parse_line(line, &Delimiter::comma())
    }

    #[test]
    fn test_plain_fields() {
        let parsed = parse("a,b,,c");
        assert_eq!(parsed.values, vec!["a", "b", "", "c"]);
        assert_eq!(parsed.bad_field, None);
    }

    #[test]
    fn test_quoted_fields() {
        let parsed = parse("\"a,1\",\"say \"\"hi\"\"\",c");
        assert_eq!(parsed.values, vec!["a,1", "say \"hi\"", "c"]);
        assert_eq!(parsed.bad_field, None);
    }

    #[test]
    fn test_trailing_delimiter_adds_empty_field() {
        assert_eq!(parse("a,").values, vec!["a", ""]);
        assert_eq!(parse("\"a\",").values, vec!["a", ""]);
    }

    #[test]
    fn test_unterminated_quote() {
        let parsed = parse("a,\"b,c");
        assert_eq!(parsed.values, vec!["a", "b,c"]);
        assert_eq!(parsed.bad_field, Some(1));
    }

    #[test]
    fn test_text_after_closing_quote() {
        let parsed = parse("\"a\"x,b");
        assert_eq!(parsed.values, vec!["ax", "b"]);
        assert_eq!(parsed.bad_field, Some(0));
    }

    #[test]
    fn test_stray_quote_in_plain_field() {
        let parsed = parse("a,b\"c,d");
        assert_eq!(parsed.values, vec!["a", "b\"c", "d"]);
        assert_eq!(parsed.bad_field, Some(1));
    }

    #[test]
    fn test_multi_character_delimiter() {
        let parsed = parse_line("a||\"b||c\"||d", &Delimiter::from_name("||").unwrap());
        assert_eq!(parsed.values, vec!["a", "b||c", "d"]);
    }

    #[test]
    fn test_clean_field() {
        assert_eq!(clean_field("  value \t"), "value");
        assert_eq!(clean_field("\u{feff}Name"), "Name");
        assert_eq!(clean_field(""), "");
    }
}
