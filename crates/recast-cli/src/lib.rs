//! CLI library components for recast.

pub mod cli;
pub mod commands;
pub mod console;
pub mod logging;
pub mod tables;
