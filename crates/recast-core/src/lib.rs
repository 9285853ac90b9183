//! Record parsing and repair engine.
//!
//! Turns decoded source lines into a [`RecordSet`](recast_model::RecordSet)
//! and projects it back into delimiter-joined output lines.
//!
//! # Features
//!
//! - **Delimiter detection**: Guess comma, semicolon or tab from the first lines
//! - **Column count resolution**: Explicit count or sampled from lines 0 and 1
//! - **Quote-aware parsing**: Quoted fields with doubled-quote escapes
//! - **Recovery**: Abort, ignore or fix malformed lines per condition
//! - **Header rewriting**: Replace or synthesize the header row
//! - **Projection**: Select, reorder and blank columns, fully quoted output
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use recast_core::{Processor, RecordingDiagnostics};
//! use recast_model::ProcessOptions;
//!
//! let mut processor = Processor::new(ProcessOptions::default(), RecordingDiagnostics::new());
//! processor.load(Path::new("in.csv"), "utf-8")?;
//! processor.set_pattern("0,-1,2")?;
//! println!("{}", processor.records_as_text(Some(5)));
//! processor.save(Path::new("out.csv"), "latin1")?;
//! ```

pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod headers;
pub mod parser;
pub mod processor;
pub mod projector;
pub mod recovery;
pub mod store;

// === Error Types ===
pub use error::{ProcessError, Result};

// === Diagnostics ===
pub use diagnostics::{DiagnosticEvent, Diagnostics, ExitRequest, RecordingDiagnostics, Reporter};

// === Engine ===
pub use processor::{LoadSummary, Processor, SaveSummary};

// === Stages ===
pub use detect::{DelimiterCounts, detect_delimiter, resolve_column_count};
pub use headers::{generic_column_name, resolve_headers};
pub use parser::{ParsedLine, clean_field, parse_line};
pub use projector::{NO_LINES_TEXT, project_record, quote_field, render_preview};
