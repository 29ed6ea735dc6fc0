//! temvoc CLI library.
//!
//! This crate wraps the `temvoc-core` engine with WAV file I/O, argument
//! parsing, console reporting and JSON output. The `temvoc` binary is a thin
//! dispatcher over [`commands::mosaic::run`].

pub mod audio;
pub mod cli_args;
pub mod commands;

mod reporting;
