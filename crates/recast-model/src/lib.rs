//! Core data types for recast.
//!
//! This crate holds the in-memory shape of a loaded delimited text file and
//! the configuration that drives its processing. It performs no I/O.
//!
//! # Types
//!
//! - **Records**: [`RecordSet`] owns every [`Record`], which owns its [`Field`]s
//! - **Selection**: [`SelectionPattern`] describes the output column layout
//! - **Delimiters**: [`Delimiter`] parses names like `tab` or `semicolon`
//! - **Options**: [`ProcessOptions`] and the resolved [`RecoveryPolicy`]
//! - **Exit codes**: [`ExitCode`] classifies fatal outcomes for the host process

pub mod delimiter;
pub mod error;
pub mod exit_code;
pub mod options;
pub mod pattern;
pub mod record;

pub use delimiter::{Delimiter, DelimiterSetting};
pub use error::PatternError;
pub use exit_code::ExitCode;
pub use options::{PolicyResolution, ProcessOptions, Recovery, RecoveryPolicy};
pub use pattern::{BLANK_COLUMN, SelectionPattern};
pub use record::{Field, Record, RecordSet};
