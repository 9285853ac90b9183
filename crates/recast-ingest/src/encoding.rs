//! Encoding resolution and byte conversion.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{IngestError, Result};

/// A resolved text encoding together with its byte-order-mark policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    ascii_only: bool,
    byte_order_mark: bool,
    fallback_code_page: Option<u32>,
}

impl TextEncoding {
    /// UTF-8 without a byte-order mark.
    pub fn utf8() -> Self {
        Self::from_encoding(encoding_rs::UTF_8)
    }

    /// UTF-8 with a byte-order mark.
    pub fn utf8_bom() -> Self {
        Self {
            byte_order_mark: true,
            ..Self::utf8()
        }
    }

    /// 7-bit ASCII. Other characters are written as `?`.
    pub fn ascii() -> Self {
        Self {
            ascii_only: true,
            ..Self::from_encoding(encoding_rs::WINDOWS_1252)
        }
    }

    fn from_encoding(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            ascii_only: false,
            byte_order_mark: is_utf16(encoding),
            fallback_code_page: None,
        }
    }

    /// Resolves an encoding name, alias or numeric Windows code page.
    ///
    /// Names are case-insensitive. Empty text and `default` mean UTF-8.
    /// Unknown code pages fall back to UTF-8 (see [`TextEncoding::fallback_code_page`]);
    /// unknown names are an error.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "default" | "utf-8" | "utf8" => return Ok(Self::utf8()),
            "utf-8-bom" | "utf8bom" => return Ok(Self::utf8_bom()),
            "latin1" | "latin-1" => return Ok(Self::from_encoding(encoding_rs::WINDOWS_1252)),
            "ascii" | "us-ascii" => return Ok(Self::ascii()),
            "unicode" | "utf-16" => return Ok(Self::from_encoding(encoding_rs::UTF_16LE)),
            _ => {}
        }
        if let Ok(code_page) = trimmed.parse::<u32>() {
            return Ok(match code_page_encoding(code_page) {
                Some(encoding) => encoding,
                None => Self {
                    fallback_code_page: Some(code_page),
                    ..Self::utf8()
                },
            });
        }
        Encoding::for_label(trimmed.as_bytes())
            .map(Self::from_encoding)
            .ok_or_else(|| IngestError::InvalidEncoding {
                name: name.to_string(),
            })
    }

    /// Forces a byte-order mark on UTF-8 output.
    #[must_use]
    pub fn with_byte_order_mark(mut self, enable: bool) -> Self {
        if self.encoding == encoding_rs::UTF_8 {
            self.byte_order_mark = self.byte_order_mark || enable;
        }
        self
    }

    /// Display name of the encoding.
    pub fn name(&self) -> &'static str {
        if self.ascii_only {
            "US-ASCII"
        } else if self.byte_order_mark && self.encoding == encoding_rs::UTF_8 {
            "UTF-8 with BOM"
        } else {
            self.encoding.name()
        }
    }

    pub fn writes_byte_order_mark(&self) -> bool {
        self.byte_order_mark
    }

    /// Code page that was requested but is not supported, when UTF-8 was substituted.
    pub fn fallback_code_page(&self) -> Option<u32> {
        self.fallback_code_page
    }

    /// Decodes bytes to text. A leading byte-order mark overrides this
    /// encoding and is stripped. Returns the text and whether malformed
    /// sequences were replaced.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> (Cow<'a, str>, bool) {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if used != self.encoding {
            tracing::debug!(
                configured = self.encoding.name(),
                detected = used.name(),
                "byte-order mark overrides configured encoding"
            );
        }
        (text, had_errors)
    }

    /// Encodes text, prepending the byte-order mark when this encoding
    /// writes one. Returns the bytes and whether unmappable characters were
    /// replaced.
    pub fn encode(&self, text: &str) -> (Vec<u8>, bool) {
        if self.ascii_only {
            let mut replaced = false;
            let bytes: Vec<u8> = text
                .chars()
                .map(|ch| {
                    if ch.is_ascii() {
                        ch as u8
                    } else {
                        replaced = true;
                        b'?'
                    }
                })
                .collect();
            return (bytes, replaced);
        }
        if is_utf16(self.encoding) {
            let big_endian = self.encoding == encoding_rs::UTF_16BE;
            let mut bytes = Vec::with_capacity(text.len() * 2 + 2);
            for unit in std::iter::once(0xFEFF_u16).chain(text.encode_utf16()) {
                let pair = if big_endian {
                    unit.to_be_bytes()
                } else {
                    unit.to_le_bytes()
                };
                bytes.extend_from_slice(&pair);
            }
            return (bytes, false);
        }
        let mut bytes = Vec::with_capacity(text.len() + 3);
        if self.byte_order_mark && self.encoding == encoding_rs::UTF_8 {
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
        }
        let (encoded, _, had_errors) = self.encoding.encode(text);
        bytes.extend_from_slice(&encoded);
        (bytes, had_errors)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

fn is_utf16(encoding: &'static Encoding) -> bool {
    encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE
}

/// Maps Windows code page numbers onto supported encodings.
fn code_page_encoding(code_page: u32) -> Option<TextEncoding> {
    let encoding = match code_page {
        20127 => return Some(TextEncoding::ascii()),
        65001 => encoding_rs::UTF_8,
        1200 => encoding_rs::UTF_16LE,
        1201 => encoding_rs::UTF_16BE,
        874 => encoding_rs::WINDOWS_874,
        866 => encoding_rs::IBM866,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1252 | 28591 => encoding_rs::WINDOWS_1252,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1256 => encoding_rs::WINDOWS_1256,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        10000 => encoding_rs::MACINTOSH,
        20866 => encoding_rs::KOI8_R,
        21866 => encoding_rs::KOI8_U,
        28592 => encoding_rs::ISO_8859_2,
        28593 => encoding_rs::ISO_8859_3,
        28594 => encoding_rs::ISO_8859_4,
        28595 => encoding_rs::ISO_8859_5,
        28596 => encoding_rs::ISO_8859_6,
        28597 => encoding_rs::ISO_8859_7,
        28598 => encoding_rs::ISO_8859_8,
        28603 => encoding_rs::ISO_8859_13,
        28605 => encoding_rs::ISO_8859_15,
        54936 => encoding_rs::GB18030,
        _ => return None,
    };
    Some(TextEncoding::from_encoding(encoding))
}
