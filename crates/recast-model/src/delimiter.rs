//! Field separators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The text separating fields on a line.
///
/// Usually a single character (comma, semicolon or tab), but any non-empty
/// text is accepted when configured explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Delimiter(String);

impl Delimiter {
    pub fn comma() -> Self {
        Self(",".to_string())
    }

    pub fn semicolon() -> Self {
        Self(";".to_string())
    }

    pub fn tab() -> Self {
        Self("\t".to_string())
    }

    /// Parses a delimiter from a name (`tab`, `comma`, `semicolon`) or literal text.
    ///
    /// Returns `None` for empty text.
    pub fn from_name(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "" => None,
            "tab" => Some(Self::tab()),
            "comma" => Some(Self::comma()),
            "semicolon" => Some(Self::semicolon()),
            _ => Some(Self(text.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(&self) -> &str {
        match self.0.as_str() {
            "," => "comma",
            ";" => "semicolon",
            "\t" => "tab",
            other => other,
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::comma()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the read delimiter is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DelimiterSetting {
    /// Detect from the first lines of the file.
    #[default]
    Auto,
    Explicit(Delimiter),
}

impl DelimiterSetting {
    /// Parses `auto` (or empty text) as [`DelimiterSetting::Auto`], anything
    /// else through [`Delimiter::from_name`].
    pub fn from_name(text: &str) -> Self {
        if text.eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        Delimiter::from_name(text).map_or(Self::Auto, Self::Explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_delimiters() {
        assert_eq!(Delimiter::from_name("tab"), Some(Delimiter::tab()));
        assert_eq!(Delimiter::from_name("Comma"), Some(Delimiter::comma()));
        assert_eq!(
            Delimiter::from_name("SEMICOLON"),
            Some(Delimiter::semicolon())
        );
    }

    #[test]
    fn test_literal_delimiter() {
        let delimiter = Delimiter::from_name("||").unwrap();
        assert_eq!(delimiter.as_str(), "||");
        assert_eq!(delimiter.describe(), "||");
        assert_eq!(Delimiter::from_name(""), None);
    }

    #[test]
    fn test_setting_from_name() {
        assert_eq!(DelimiterSetting::from_name("auto"), DelimiterSetting::Auto);
        assert_eq!(DelimiterSetting::from_name(""), DelimiterSetting::Auto);
        assert_eq!(
            DelimiterSetting::from_name(";"),
            DelimiterSetting::Explicit(Delimiter::semicolon())
        );
    }
}
