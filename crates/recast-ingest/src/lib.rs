//! File access for recast.
//!
//! This crate is the boundary between the record engine and the operating
//! system. The engine works on decoded text lines; everything that touches
//! bytes or the filesystem lives here.
//!
//! # Features
//!
//! - **Encodings**: Resolve encoding names and Windows code pages to [`TextEncoding`]
//! - **Reading**: Decode a source file into lines with BOM sniffing
//! - **Writing**: Encode output lines with the target's byte-order-mark policy
//! - **File age**: Compare a file's modification time against a day limit
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use recast_ingest::{TextEncoding, read_source, write_lines};
//!
//! let source = read_source(Path::new("in.csv"), &TextEncoding::from_name("latin1")?)?;
//! let summary = write_lines(Path::new("out.csv"), &source.lines, &TextEncoding::utf8())?;
//! ```

mod age;
mod encoding;
mod error;
mod reader;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encodings ===
pub use encoding::TextEncoding;

// === Reading ===
pub use reader::{SourceText, read_source};

// === Writing ===
pub use writer::{LINE_TERMINATOR, WriteSummary, has_illegal_file_characters, write_lines};

// === File Age ===
pub use age::{DEFAULT_AGE_LIMIT_DAYS, FileAge, file_age};
