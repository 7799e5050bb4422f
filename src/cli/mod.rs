//! CLI module for Quill
//!
//! Provides command-line interface for:
//! - init: Create the database schema
//! - start: Serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, init_database, run, run_command, start};
pub use errors::{CliError, CliErrorCode, CliResult};
